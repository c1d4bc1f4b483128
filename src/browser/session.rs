//! Live browser session wrapper.
//!
//! Owns the chromiumoxide browser process, its event-handler task and
//! the single page every navigation reuses. All driver errors are
//! classified here: transport-level failures surface as
//! [`HarvestError::SessionLost`] so the orchestrator can recover, while
//! per-page failures stay non-fatal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::browser::profile::BrowserProfile;
use crate::error::{HarvestError, Result};

/// Masks the most common automation fingerprint before any page script
/// runs. Injected once per session, applies to every navigation.
const MASK_AUTOMATION_SCRIPT: &str =
	"Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The single live automation session. Exclusively owned by the
/// orchestrator and lent to the fetcher for one fetch call at a time.
pub struct BrowserSession {
	browser: Browser,
	page: Page,
	handler_task: JoinHandle<()>,
	lost: Arc<AtomicBool>,
	element_wait: Duration,
}

impl BrowserSession {
	/// Launches a browser with the given profile and prepares the
	/// session page. The anti-fingerprinting script is installed before
	/// the session is handed out.
	pub async fn launch(executable: &str, profile: &BrowserProfile) -> Result<Self> {
		let mut builder = BrowserConfig::builder()
			.chrome_executable(executable)
			.window_size(profile.window.0, profile.window.1)
			.args(profile.flags.iter().copied())
			.request_timeout(profile.page_load_timeout);
		if !profile.headless {
			builder = builder.with_head();
		}
		let config = builder.build().map_err(HarvestError::SessionCreation)?;

		let (browser, mut handler) = Browser::launch(config)
			.await
			.map_err(|err| HarvestError::SessionCreation(err.to_string()))?;

		// The handler future must be polled for the connection to make
		// progress; when it ends the session is gone for good.
		let lost = Arc::new(AtomicBool::new(false));
		let lost_flag = Arc::clone(&lost);
		let handler_task = tokio::spawn(async move {
			while let Some(event) = handler.next().await {
				if event.is_err() {
					break;
				}
			}
			lost_flag.store(true, Ordering::SeqCst);
		});

		let page = browser
			.new_page("about:blank")
			.await
			.map_err(|err| HarvestError::SessionCreation(err.to_string()))?;

		page.execute(AddScriptToEvaluateOnNewDocumentParams::new(MASK_AUTOMATION_SCRIPT))
			.await
			.map_err(|err| HarvestError::SessionCreation(err.to_string()))?;

		debug!(target = "previsao.browser", profile = profile.label, "session ready");

		Ok(Self {
			browser,
			page,
			handler_task,
			lost,
			element_wait: profile.element_wait,
		})
	}

	/// Whether the driver connection is still believed to be up.
	pub fn is_alive(&self) -> bool {
		!self.lost.load(Ordering::SeqCst)
	}

	fn ensure_alive(&self) -> Result<()> {
		if self.is_alive() {
			Ok(())
		} else {
			Err(HarvestError::SessionLost("browser event handler exited".to_string()))
		}
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		self.ensure_alive()?;
		match self.page.goto(url).await {
			Ok(_) => Ok(()),
			Err(err) if is_session_error(&err) => Err(HarvestError::SessionLost(err.to_string())),
			Err(err) => Err(HarvestError::Navigation {
				url: url.to_string(),
				source: anyhow::Error::new(err),
			}),
		}
	}

	/// Polls for a selector until it appears or the timeout elapses.
	/// Absence after the deadline fails distinctly with
	/// [`HarvestError::Timeout`].
	pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
		let deadline = Instant::now() + timeout;
		loop {
			self.ensure_alive()?;
			match self.page.find_element(selector).await {
				Ok(_) => return Ok(()),
				Err(err) if is_session_error(&err) => {
					return Err(HarvestError::SessionLost(err.to_string()));
				}
				Err(_) => {}
			}
			if Instant::now() >= deadline {
				return Err(HarvestError::Timeout {
					ms: timeout.as_millis() as u64,
					condition: selector.to_string(),
				});
			}
			tokio::time::sleep(POLL_INTERVAL).await;
		}
	}

	/// Enumerates elements matching a selector, polling briefly (the
	/// profile's element wait) before accepting an empty result.
	pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
		let deadline = Instant::now() + self.element_wait;
		loop {
			self.ensure_alive()?;
			match self.page.find_elements(selector).await {
				Ok(elements) if !elements.is_empty() => return Ok(elements),
				Ok(elements) => {
					if Instant::now() >= deadline {
						return Ok(elements);
					}
				}
				Err(err) if is_session_error(&err) => {
					return Err(HarvestError::SessionLost(err.to_string()));
				}
				Err(err) => {
					if Instant::now() >= deadline {
						return Err(HarvestError::Extraction(err.to_string()));
					}
				}
			}
			tokio::time::sleep(POLL_INTERVAL).await;
		}
	}

	/// Reads an element's rendered text.
	pub async fn element_text(&self, element: &Element) -> Result<String> {
		match element.inner_text().await {
			Ok(Some(text)) => Ok(text),
			Ok(None) => Err(HarvestError::Extraction("element has no text".to_string())),
			Err(err) if is_session_error(&err) => Err(HarvestError::SessionLost(err.to_string())),
			Err(err) => Err(HarvestError::Extraction(err.to_string())),
		}
	}

	/// Best-effort teardown; never propagates an error.
	pub async fn close(mut self) {
		if let Err(err) = self.browser.close().await {
			debug!(target = "previsao.browser", error = %err, "browser close failed");
		}
		self.handler_task.abort();
	}
}

/// Transport-level failures mean the session itself is unusable;
/// everything else is a per-page condition.
fn is_session_error(err: &CdpError) -> bool {
	matches!(
		err,
		CdpError::Ws(_) | CdpError::Io(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse
	)
}
