//! Immutable run configuration.
//!
//! All tunables are resolved once at startup into a plain value that is
//! passed down by reference; nothing mutates configuration mid-run.

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved configuration for one collection run.
#[derive(Debug, Clone)]
pub struct RunConfig {
	/// Base URL of the forecast portal; the target code is appended.
	pub base_url: String,
	/// Maximum fetch attempts per target, including the first.
	pub max_attempts: u32,
	/// A checkpoint is written after every N processed targets.
	pub checkpoint_every: usize,
	/// How long to wait for the content-ready marker after navigation.
	pub content_timeout: Duration,
	/// Settle delay after the marker appears, for client-side rendering.
	pub settle_delay: Duration,
	/// Directory receiving the primary, snapshot and checkpoint tables.
	pub out_dir: PathBuf,
	/// Run the browser with a visible window.
	pub headed: bool,
	/// Process only the first N targets when set.
	pub limit: Option<usize>,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			base_url: "https://previsao.inmet.gov.br".to_string(),
			max_attempts: 8,
			checkpoint_every: 10,
			content_timeout: Duration::from_secs(30),
			settle_delay: Duration::from_millis(1500),
			out_dir: PathBuf::from("."),
			headed: false,
			limit: None,
		}
	}
}

impl RunConfig {
	/// Sets the output directory.
	pub fn with_out_dir(mut self, dir: PathBuf) -> Self {
		self.out_dir = dir;
		self
	}

	/// Sets headed (visible window) mode.
	pub fn with_headed(mut self, headed: bool) -> Self {
		self.headed = headed;
		self
	}

	/// Caps the number of targets processed.
	pub fn with_limit(mut self, limit: Option<usize>) -> Self {
		self.limit = limit;
		self
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn defaults_match_collection_contract() {
		let config = RunConfig::default();
		assert_eq!(config.max_attempts, 8);
		assert_eq!(config.checkpoint_every, 10);
		assert_eq!(config.content_timeout, Duration::from_secs(30));
		assert_eq!(config.settle_delay, Duration::from_millis(1500));
	}
}
