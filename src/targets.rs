//! Static collection targets.
//!
//! Targets are IBGE seven-digit municipality codes. The forecast portal
//! publishes one page per code, so the code is the only addressing
//! information the collector needs. The list is static configuration;
//! codes are unique and each is processed at most once per run.

use std::fmt;

use serde::Serialize;

/// A single municipality code to collect a forecast for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
	pub fn new(code: impl Into<String>) -> Self {
		Self(code.into())
	}

	pub fn code(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Municipality codes for the state of Rio de Janeiro.
pub const MUNICIPALITY_CODES: &[&str] = &[
	"3300100", "3300159", "3300209", "3300225", "3300233", "3300258", "3300308",
	"3300407", "3300456", "3300506", "3300605", "3300704", "3300803", "3300902",
	"3300936", "3300951", "3301009", "3301108", "3301157", "3301207", "3301306",
	"3301405", "3301504", "3301603", "3301702", "3301801", "3301850", "3301876",
	"3301900", "3302007", "3302056", "3302106", "3302205", "3302254", "3302270",
	"3302304", "3302403", "3302452", "3302502", "3302601", "3302700", "3302809",
	"3302858", "3302908", "3303005", "3303104", "3303203", "3303302", "3303401",
	"3303500", "3303609", "3303708", "3303807", "3303856", "3303906", "3303955",
	"3304003", "3304102", "3304110", "3304128", "3304144", "3304151", "3304201",
	"3304300", "3304409", "3304508", "3304524", "3304557", "3304607", "3304706",
	"3304755", "3304805", "3304904", "3305000", "3305109", "3305133", "3305158",
	"3305208", "3305307", "3305406", "3305505", "3305554", "3305604", "3305703",
	"3305752", "3305802", "3305901", "3306008", "3306107", "3306156", "3306206",
	"3306305",
];

/// The full static target list in collection order.
pub fn default_targets() -> Vec<Target> {
	MUNICIPALITY_CODES.iter().map(|&code| Target::new(code)).collect()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn default_targets_are_unique() {
		let targets = default_targets();
		let unique: HashSet<_> = targets.iter().collect();
		assert_eq!(unique.len(), targets.len());
	}

	#[test]
	fn codes_are_seven_digit_numeric() {
		for code in MUNICIPALITY_CODES {
			assert_eq!(code.len(), 7, "bad code length: {code}");
			assert!(code.chars().all(|c| c.is_ascii_digit()), "bad code: {code}");
		}
	}
}
