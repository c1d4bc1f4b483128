//! End-of-run summary statistics.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::RunState;

/// Summary of what a run accumulated, reported human-readably and as a
/// structured JSON value.
#[derive(Debug, Serialize)]
pub struct RunSummary {
	/// Total records collected.
	pub records: usize,
	/// Targets that contributed at least one record.
	pub targets_with_data: usize,
	/// Targets processed, with or without data.
	pub processed_targets: usize,
	/// Record count per forecast date.
	pub per_date: BTreeMap<NaiveDate, usize>,
	/// Whether the run was stopped by an external interrupt.
	pub interrupted: bool,
}

impl RunSummary {
	pub fn from_state(state: &RunState, interrupted: bool) -> Self {
		let mut targets = HashSet::new();
		let mut per_date = BTreeMap::new();
		for record in state.records() {
			targets.insert(record.target.clone());
			*per_date.entry(record.date).or_insert(0) += 1;
		}

		Self {
			records: state.len(),
			targets_with_data: targets.len(),
			processed_targets: state.processed(),
			per_date,
			interrupted,
		}
	}
}

impl fmt::Display for RunSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "records collected: {}", self.records)?;
		writeln!(f, "targets with data: {}", self.targets_with_data)?;
		writeln!(f, "targets processed: {}", self.processed_targets)?;
		for (date, count) in &self.per_date {
			writeln!(f, "  {date}: {count} records")?;
		}
		if self.interrupted {
			writeln!(f, "run was interrupted before completion")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;
	use crate::targets::Target;
	use crate::types::ForecastRecord;

	fn record(code: &str, day: u32) -> ForecastRecord {
		ForecastRecord {
			target: Target::new(code),
			date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
			temp_min: "14°C".to_string(),
			temp_max: "27°C".to_string(),
		}
	}

	#[test]
	fn summary_counts_records_targets_and_dates() {
		let mut state = RunState::new();
		state.append(vec![record("3300100", 6), record("3300100", 7), record("3300159", 6)]);
		state.mark_processed();
		state.mark_processed();
		state.mark_processed();

		let summary = RunSummary::from_state(&state, false);
		assert_eq!(summary.records, 3);
		assert_eq!(summary.targets_with_data, 2);
		assert_eq!(summary.processed_targets, 3);
		assert_eq!(summary.per_date.len(), 2);
		assert_eq!(summary.per_date[&NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()], 2);
	}

	#[test]
	fn empty_run_summarizes_cleanly() {
		let summary = RunSummary::from_state(&RunState::new(), false);
		assert_eq!(summary.records, 0);
		assert_eq!(summary.targets_with_data, 0);
		assert!(summary.per_date.is_empty());
	}
}
