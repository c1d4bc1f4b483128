use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{error, info, warn};

use previsao::browser::launcher;
use previsao::browser::profile::profile_ladder;
use previsao::cli::Cli;
use previsao::collect::Harvester;
use previsao::collect::pacing::JitteredPacing;
use previsao::config::RunConfig;
use previsao::error::HarvestError;
use previsao::fetch::ForecastFetcher;
use previsao::logging;
use previsao::report::RunSummary;
use previsao::session::ChromeSessionFactory;
use previsao::store::CsvStore;
use previsao::targets;
use previsao::types::DateWindow;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match run(cli).await {
		Ok(summary) => {
			for line in summary.to_string().lines() {
				info!(target = "previsao", "{line}");
			}
			if let Ok(json) = serde_json::to_string(&summary) {
				info!(target = "previsao", summary = %json, "run complete");
			}
		}
		Err(err) => {
			error!(target = "previsao", error = %err, "run failed");
			let code = match err {
				HarvestError::BrowserNotFound => 2,
				_ => 1,
			};
			std::process::exit(code);
		}
	}
}

async fn run(cli: Cli) -> previsao::error::Result<RunSummary> {
	// Refuse to start without a browser; nothing is collected or
	// written when this fails.
	let executable = launcher::find_chrome_executable().ok_or(HarvestError::BrowserNotFound)?;
	info!(target = "previsao", browser = %executable, "browser binary found");

	let config = RunConfig::default()
		.with_out_dir(cli.out_dir)
		.with_headed(cli.headed)
		.with_limit(cli.limit);

	let mut targets = targets::default_targets();
	if let Some(limit) = config.limit {
		targets.truncate(limit);
	}

	// Computed once; a long run keeps the same window throughout.
	let window = DateWindow::from_today();

	let interrupt = Arc::new(AtomicBool::new(false));
	let flag = Arc::clone(&interrupt);
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			warn!(target = "previsao", "interrupt received, stopping after current work and persisting");
			flag.store(true, Ordering::SeqCst);
		}
	});

	let factory = ChromeSessionFactory::new(executable, profile_ladder(config.headed));
	let fetcher = ForecastFetcher::new(&config);
	let store = CsvStore::new(config.out_dir.clone());

	let mut harvester = Harvester::new(factory, fetcher, JitteredPacing::default(), store, &config, interrupt);
	harvester.run(&targets, &window).await
}
