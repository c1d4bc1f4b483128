//! Per-target forecast fetching.
//!
//! One fetch call navigates the lent session to a target's forecast
//! page, waits for the content-ready marker, and extracts up to five
//! days of readings. The outcome is an explicit result type consumed by
//! the orchestrator's retry machinery; no error escapes a fetch call
//! except through classification into an outcome.

pub mod parse;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::browser::session::BrowserSession;
use crate::config::RunConfig;
use crate::error::HarvestError;
use crate::fetch::parse::parse_day;
use crate::targets::Target;
use crate::types::{DateWindow, ForecastRecord};

/// The marker that the forecast grid has rendered; also the selector
/// enumerating one section per forecast day, in chronological order.
const DAY_SECTION_SELECTOR: &str = "section.grid.grid-template-columns-4";

/// Classified result of one fetch attempt.
#[derive(Debug)]
pub enum FetchOutcome {
	/// At least one day yielded a record.
	Success(Vec<ForecastRecord>),
	/// The page answered but no day produced a record. Deliberately
	/// indistinguishable from a timeout for retry purposes: it may mean
	/// "no published forecast" or a transient failure, and the
	/// collector does not assume which.
	Empty,
	/// The content-ready marker never appeared.
	Timeout,
	/// The session itself is unusable; the orchestrator must recover
	/// before any further fetching.
	SessionLost(String),
}

/// Fetches one target's records through a lent session. The
/// orchestrator is generic over this seam.
#[async_trait]
pub trait Fetcher<S>: Send + Sync {
	async fn fetch(&self, session: &mut S, target: &Target, window: &DateWindow) -> FetchOutcome;
}

/// The production fetcher, driving a [`BrowserSession`].
pub struct ForecastFetcher {
	base_url: String,
	content_timeout: Duration,
	settle_delay: Duration,
}

impl ForecastFetcher {
	pub fn new(config: &RunConfig) -> Self {
		Self {
			base_url: config.base_url.clone(),
			content_timeout: config.content_timeout,
			settle_delay: config.settle_delay,
		}
	}

	fn target_url(&self, target: &Target) -> String {
		format!("{}/{}", self.base_url.trim_end_matches('/'), target.code())
	}

	async fn fetch_inner(
		&self,
		session: &BrowserSession,
		target: &Target,
		window: &DateWindow,
	) -> Result<Vec<ForecastRecord>, HarvestError> {
		let url = self.target_url(target);
		session.navigate(&url).await?;
		session.wait_for_selector(DAY_SECTION_SELECTOR, self.content_timeout).await?;

		// Let client-side rendering finish before reading text.
		tokio::time::sleep(self.settle_delay).await;

		let sections = session.find_all(DAY_SECTION_SELECTOR).await?;

		let mut records = Vec::new();
		for (index, section) in sections.iter().take(DateWindow::DAYS).enumerate() {
			let Some(date) = window.date(index) else {
				break;
			};

			// A failed day must not abort the rest of the page.
			let text = match session.element_text(section).await {
				Ok(text) => text,
				Err(err @ HarvestError::SessionLost(_)) => return Err(err),
				Err(err) => {
					debug!(
						target = "previsao.fetch",
						target_code = %target,
						day = index,
						error = %err,
						"day section unreadable, skipping"
					);
					continue;
				}
			};

			match parse_day(&text) {
				Some(reading) => records.push(ForecastRecord {
					target: target.clone(),
					date,
					temp_min: reading.temp_min,
					temp_max: reading.temp_max,
				}),
				None => {
					debug!(
						target = "previsao.fetch",
						target_code = %target,
						day = index,
						"day section missing temperature labels, skipping"
					);
				}
			}
		}

		Ok(records)
	}
}

#[async_trait]
impl Fetcher<BrowserSession> for ForecastFetcher {
	async fn fetch(&self, session: &mut BrowserSession, target: &Target, window: &DateWindow) -> FetchOutcome {
		match self.fetch_inner(session, target, window).await {
			Ok(records) if records.is_empty() => FetchOutcome::Empty,
			Ok(records) => FetchOutcome::Success(records),
			Err(HarvestError::Timeout { ms, condition }) => {
				debug!(target = "previsao.fetch", target_code = %target, ms, %condition, "content wait timed out");
				FetchOutcome::Timeout
			}
			Err(HarvestError::SessionLost(reason)) => FetchOutcome::SessionLost(reason),
			Err(err) => {
				// Anything else is non-fatal for the run: zero records
				// for this attempt, the retry budget decides the rest.
				warn!(target = "previsao.fetch", target_code = %target, error = %err, "fetch attempt failed");
				FetchOutcome::Empty
			}
		}
	}
}
