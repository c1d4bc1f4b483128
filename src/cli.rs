//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "previsao")]
#[command(about = "Collects 5-day INMET temperature forecasts into CSV tables")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Directory for the primary, snapshot and checkpoint tables
	#[arg(long, value_name = "DIR", default_value = ".")]
	pub out_dir: PathBuf,

	/// Run the browser with a visible window instead of headless
	#[arg(long)]
	pub headed: bool,

	/// Process only the first N targets
	#[arg(long, value_name = "N")]
	pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_defaults() {
		let cli = Cli::try_parse_from(["previsao"]).unwrap();
		assert_eq!(cli.verbose, 0);
		assert_eq!(cli.out_dir, PathBuf::from("."));
		assert!(!cli.headed);
		assert!(cli.limit.is_none());
	}

	#[test]
	fn parse_flags() {
		let cli = Cli::try_parse_from(["previsao", "-vv", "--out-dir", "/tmp/previsao", "--headed", "--limit", "3"]).unwrap();
		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.out_dir, PathBuf::from("/tmp/previsao"));
		assert!(cli.headed);
		assert_eq!(cli.limit, Some(3));
	}

	#[test]
	fn unknown_flag_fails() {
		assert!(Cli::try_parse_from(["previsao", "--parallel"]).is_err());
	}
}
