//! Core data model shared across the collection pipeline.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use crate::targets::Target;

/// The consecutive calendar dates a run collects forecasts for.
///
/// Computed once at run start and shared by every target, so "today"
/// does not drift during a long run. Day-section index `i` on a
/// forecast page corresponds to `date(i)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
	dates: Vec<NaiveDate>,
}

impl DateWindow {
	/// Number of forecast days published per target page.
	pub const DAYS: usize = 5;

	/// Builds the window starting at the given date.
	pub fn starting(first: NaiveDate) -> Self {
		let dates = (0..Self::DAYS as u64)
			.map(|offset| first + Days::new(offset))
			.collect();
		Self { dates }
	}

	/// Builds the window starting at the local wall-clock date.
	pub fn from_today() -> Self {
		Self::starting(Local::now().date_naive())
	}

	pub fn date(&self, index: usize) -> Option<NaiveDate> {
		self.dates.get(index).copied()
	}

	pub fn contains(&self, date: NaiveDate) -> bool {
		self.dates.contains(&date)
	}

	pub fn dates(&self) -> &[NaiveDate] {
		&self.dates
	}
}

/// One collected observation: a (target, date) pair with the raw
/// extracted minimum and maximum temperature strings.
///
/// Values are kept as extracted, not numerically parsed; the collector
/// guarantees process resilience, not value correctness. A record is
/// only produced when both values were present on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRecord {
	pub target: Target,
	pub date: NaiveDate,
	pub temp_min: String,
	pub temp_max: String,
}

impl ForecastRecord {
	/// The uniqueness key: no two records in a run may share it.
	pub fn key(&self) -> (Target, NaiveDate) {
		(self.target.clone(), self.date)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn window_spans_five_consecutive_days() {
		let window = DateWindow::starting(date(2026, 2, 27));
		assert_eq!(window.dates().len(), DateWindow::DAYS);
		assert_eq!(window.date(0), Some(date(2026, 2, 27)));
		assert_eq!(window.date(1), Some(date(2026, 2, 28)));
		// crosses the month boundary
		assert_eq!(window.date(2), Some(date(2026, 3, 1)));
		assert_eq!(window.date(4), Some(date(2026, 3, 3)));
		assert_eq!(window.date(5), None);
	}

	#[test]
	fn window_membership() {
		let window = DateWindow::starting(date(2026, 8, 1));
		assert!(window.contains(date(2026, 8, 3)));
		assert!(!window.contains(date(2026, 8, 6)));
		assert!(!window.contains(date(2026, 7, 31)));
	}
}
