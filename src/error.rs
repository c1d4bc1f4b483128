//! Error taxonomy for the collection pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, Error)]
pub enum HarvestError {
	/// No compatible browser executable on the host. Raised before any
	/// collection begins; maps to a distinct process exit status.
	#[error("no compatible Chrome/Chromium executable found on this host")]
	BrowserNotFound,

	/// Every attempt of the session creation ladder failed. Fatal at
	/// run start; nothing has been collected yet.
	#[error("failed to create browser session: {0}")]
	SessionCreation(String),

	/// The live session crashed or disconnected mid-run. Triggers
	/// destroy-and-recreate recovery rather than aborting.
	#[error("browser session lost: {0}")]
	SessionLost(String),

	#[error("navigation failed for {url}: {source}")]
	Navigation {
		url: String,
		source: anyhow::Error,
	},

	/// The content-ready marker never appeared. Per-attempt and
	/// retryable; counted against the target's attempt budget.
	#[error("timed out after {ms}ms waiting for {condition}")]
	Timeout { ms: u64, condition: String },

	/// A single day-section could not be read. Caught inside the fetch
	/// so the remaining days of the same page still get extracted.
	#[error("extraction failed: {0}")]
	Extraction(String),

	/// Session recovery itself failed. Fatal to the remainder of the
	/// run; accumulated records are still persisted.
	#[error("session recovery failed: {0}")]
	Recreation(String),

	/// A checkpoint or final table write failed. Logged and absorbed;
	/// the data stays in memory for later persistence attempts.
	#[error("failed to persist {path}: {source}")]
	Persistence {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// External cancellation. Absorbed at the run boundary after
	/// best-effort final persistence.
	#[error("interrupted by user")]
	Interrupted,
}
