//! Browser executable discovery.
//!
//! The collector refuses to start when no compatible binary exists on
//! the host; discovery runs before any session is created.

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Finds a Chrome/Chromium executable, preferring stable Chrome.
pub fn find_chrome_executable() -> Option<String> {
	let candidates: Vec<String> = if cfg!(target_os = "macos") {
		vec![
			"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
			"/Applications/Chromium.app/Contents/MacOS/Chromium",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	} else {
		vec![
			"google-chrome-stable",
			"google-chrome",
			"chromium-browser",
			"chromium",
			"/usr/bin/google-chrome-stable",
			"/usr/bin/google-chrome",
			"/usr/bin/chromium-browser",
			"/usr/bin/chromium",
			"/snap/bin/chromium",
		]
		.into_iter()
		.map(str::to_string)
		.collect()
	};

	for candidate in candidates {
		let resolved = if candidate.starts_with('/') {
			Path::new(&candidate).exists().then(|| candidate.clone())
		} else {
			which::which(&candidate)
				.ok()
				.map(|p| p.to_string_lossy().to_string())
		};

		if let Some(path) = resolved {
			if let Some(version) = probe_version(&path) {
				debug!(target = "previsao.browser", %path, %version, "browser found");
			} else {
				debug!(target = "previsao.browser", %path, "browser found (version probe failed)");
			}
			return Some(path);
		}
	}

	None
}

fn probe_version(path: &str) -> Option<String> {
	let output = Command::new(path).arg("--version").output().ok()?;
	let text = String::from_utf8_lossy(&output.stdout);
	let trimmed = text.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}
