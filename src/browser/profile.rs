//! Launch profiles.
//!
//! A profile is an explicit, immutable launch configuration value. The
//! fallback ladder is an ordered list of such values, one per creation
//! attempt; attempt selection never branches on attempt number beyond
//! indexing into the ladder.

use std::time::Duration;

/// Stability and anti-detection flags for the hardened first attempt.
const HARDENED_FLAGS: &[&str] = &[
	"--no-sandbox",
	"--disable-dev-shm-usage",
	"--disable-gpu",
	"--disable-software-rasterizer",
	"--disable-extensions",
	"--disable-background-networking",
	"--disable-default-apps",
	"--disable-sync",
	"--disable-translate",
	"--disable-background-timer-throttling",
	"--disable-renderer-backgrounding",
	"--disable-backgrounding-occluded-windows",
	"--disable-client-side-phishing-detection",
	"--disable-crash-reporter",
	"--no-crash-upload",
	"--disable-breakpad",
	"--disable-component-update",
	"--allow-pre-commit-input",
	"--autoplay-policy=user-gesture-required",
	"--disable-domain-reliability",
	"--disable-features=AudioServiceOutOfProcess,AudioServiceSandbox",
	"--disable-hang-monitor",
	"--disable-ipc-flooding-protection",
	"--disable-notifications",
	"--disable-prompt-on-repost",
	"--disable-site-isolation-trials",
	"--force-color-profile=srgb",
	"--metrics-recording-only",
	"--mute-audio",
	"--disable-blink-features=AutomationControlled",
	"--blink-settings=imagesEnabled=false",
];

/// Bare minimum to stay alive in a container.
const MINIMAL_FLAGS: &[&str] = &[
	"--no-sandbox",
	"--disable-dev-shm-usage",
];

/// One immutable browser launch configuration.
#[derive(Debug, Clone)]
pub struct BrowserProfile {
	/// Short name used in creation-attempt logs.
	pub label: &'static str,
	pub headless: bool,
	pub flags: &'static [&'static str],
	pub window: (u32, u32),
	/// Upper bound on a single page load.
	pub page_load_timeout: Duration,
	/// Default bound for element lookups that carry no explicit wait.
	pub element_wait: Duration,
}

impl BrowserProfile {
	fn hardened(headless: bool) -> Self {
		Self {
			label: "hardened",
			headless,
			flags: HARDENED_FLAGS,
			window: (1920, 1080),
			page_load_timeout: Duration::from_secs(60),
			element_wait: Duration::from_secs(10),
		}
	}

	fn headful_minimal() -> Self {
		Self {
			label: "headful-minimal",
			headless: false,
			flags: MINIMAL_FLAGS,
			window: (1920, 1080),
			page_load_timeout: Duration::from_secs(60),
			element_wait: Duration::from_secs(10),
		}
	}

	fn headless_minimal() -> Self {
		Self {
			label: "headless-minimal",
			headless: true,
			flags: MINIMAL_FLAGS,
			window: (1920, 1080),
			page_load_timeout: Duration::from_secs(60),
			element_wait: Duration::from_secs(10),
		}
	}
}

/// The creation ladder: one profile per attempt, in order. The first
/// attempt uses the full hardened configuration; the fallbacks shed
/// flags, trying a visible window before a reduced headless variant.
pub fn profile_ladder(headed: bool) -> Vec<BrowserProfile> {
	vec![
		BrowserProfile::hardened(!headed),
		BrowserProfile::headful_minimal(),
		BrowserProfile::headless_minimal(),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ladder_has_one_profile_per_creation_attempt() {
		let ladder = profile_ladder(false);
		assert_eq!(ladder.len(), 3);
		assert_eq!(ladder[0].label, "hardened");
		assert!(ladder[0].headless);
		assert!(!ladder[1].headless);
		assert!(ladder[2].headless);
	}

	#[test]
	fn headed_flag_only_affects_the_hardened_profile() {
		let ladder = profile_ladder(true);
		assert!(!ladder[0].headless);
		assert!(!ladder[1].headless);
		assert!(ladder[2].headless);
	}

	#[test]
	fn fallback_profiles_shed_flags() {
		let ladder = profile_ladder(false);
		assert!(ladder[0].flags.len() > ladder[1].flags.len());
		assert_eq!(ladder[1].flags, ladder[2].flags);
	}
}
