//! Session lifecycle management.
//!
//! The factory walks the enumerated profile ladder when creating a
//! session and tears sessions down best-effort. Recovery decisions
//! (when to destroy and recreate) belong to the orchestrator; this
//! module only knows how to produce and dispose of sessions.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::browser::profile::BrowserProfile;
use crate::browser::session::BrowserSession;
use crate::error::{HarvestError, Result};

/// Delay between creation attempts.
const CREATE_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Lifecycle of the single automation session across a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	/// Normal operating state.
	Active,
	/// A session-level error was observed; the session is unusable.
	Degraded,
	/// The old session is gone and a replacement is being created.
	Recreating,
	/// Recovery failed. Terminal and fatal to the run.
	Dead,
}

impl fmt::Display for SessionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			SessionState::Active => "active",
			SessionState::Degraded => "degraded",
			SessionState::Recreating => "recreating",
			SessionState::Dead => "dead",
		};
		f.write_str(name)
	}
}

/// Produces and disposes of automation sessions. The orchestrator is
/// generic over this seam so recovery machinery can be exercised with
/// scripted sessions in tests.
#[async_trait]
pub trait SessionFactory: Send + Sync {
	type Session: Send;

	/// Creates a session, exhausting whatever fallback strategy the
	/// implementation carries before failing with
	/// [`HarvestError::SessionCreation`].
	async fn create(&self) -> Result<Self::Session>;

	/// Best-effort teardown; must never fail.
	async fn destroy(&self, session: Self::Session);
}

/// Launches Chrome/Chromium sessions through the profile ladder: one
/// attempt per ladder entry, a fixed delay apart.
pub struct ChromeSessionFactory {
	executable: String,
	ladder: Vec<BrowserProfile>,
}

impl ChromeSessionFactory {
	pub fn new(executable: String, ladder: Vec<BrowserProfile>) -> Self {
		Self { executable, ladder }
	}
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
	type Session = BrowserSession;

	async fn create(&self) -> Result<BrowserSession> {
		let attempts = self.ladder.len();
		let mut last_error = String::new();

		for (index, profile) in self.ladder.iter().enumerate() {
			let attempt = index + 1;
			info!(
				target = "previsao.session",
				attempt,
				attempts,
				profile = profile.label,
				"creating browser session"
			);

			match BrowserSession::launch(&self.executable, profile).await {
				Ok(session) => {
					info!(target = "previsao.session", profile = profile.label, "session created");
					return Ok(session);
				}
				Err(err) => {
					warn!(
						target = "previsao.session",
						attempt,
						profile = profile.label,
						error = %err,
						"session creation attempt failed"
					);
					last_error = err.to_string();
				}
			}

			if attempt < attempts {
				tokio::time::sleep(CREATE_RETRY_DELAY).await;
			}
		}

		Err(HarvestError::SessionCreation(format!(
			"all {attempts} creation attempts failed, last error: {last_error}"
		)))
	}

	async fn destroy(&self, session: BrowserSession) {
		debug!(target = "previsao.session", "closing browser session");
		session.close().await;
	}
}
