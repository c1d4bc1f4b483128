//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Progress narration is emitted at
/// info level by default; `-v` raises to debug, `-vv` to trace.
/// `RUST_LOG` overrides the derived filter entirely.
pub fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};

	// Keep the driver's own chatter down even at -vv; the collector's
	// dotted targets ride on the global directive.
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("{default_level},chromiumoxide=warn,tungstenite=warn")));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.init();
}
