//! The collection orchestrator.
//!
//! Drives the strictly sequential run: one bounded retry loop per
//! target, session recovery on session-level failures, periodic
//! checkpoints, inter-target pacing, and unconditional final
//! persistence. This is the only component holding cross-target state.

pub mod pacing;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::error::{HarvestError, Result};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::report::RunSummary;
use crate::session::{SessionFactory, SessionState};
use crate::store::{RecordSink, RunState};
use crate::targets::Target;
use crate::types::{DateWindow, ForecastRecord};

use self::pacing::Pacing;

/// Per-target retry lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetState {
	/// Not yet attempted; the first fetch fires immediately.
	Pending,
	/// A failed attempt left budget; the next fetch follows a backoff.
	Retrying,
	/// Terminal: records collected, advance to the next target.
	Succeeded,
	/// Terminal: budget exhausted, zero records, advance anyway.
	Exhausted,
}

/// Orchestrates a whole collection run over the injected seams.
pub struct Harvester<SF, F, P, K>
where
	SF: SessionFactory,
	F: Fetcher<SF::Session>,
	P: Pacing,
	K: RecordSink,
{
	factory: SF,
	fetcher: F,
	pacing: P,
	sink: K,
	max_attempts: u32,
	checkpoint_every: usize,
	interrupt: Arc<AtomicBool>,
	session_state: SessionState,
}

impl<SF, F, P, K> Harvester<SF, F, P, K>
where
	SF: SessionFactory,
	F: Fetcher<SF::Session>,
	P: Pacing,
	K: RecordSink,
{
	pub fn new(factory: SF, fetcher: F, pacing: P, sink: K, config: &RunConfig, interrupt: Arc<AtomicBool>) -> Self {
		Self {
			factory,
			fetcher,
			pacing,
			sink,
			max_attempts: config.max_attempts,
			checkpoint_every: config.checkpoint_every,
			interrupt,
			session_state: SessionState::Active,
		}
	}

	/// Runs the full collection over `targets`.
	///
	/// Whatever has accumulated is persisted before this returns, on
	/// every path: completion, interrupt, and fatal recovery failure
	/// alike. Only session creation failing before any collection
	/// skips persistence.
	pub async fn run(&mut self, targets: &[Target], window: &DateWindow) -> Result<RunSummary> {
		info!(target = "previsao.collect", targets = targets.len(), "starting collection run");

		let mut session = Some(self.factory.create().await?);
		self.session_state = SessionState::Active;

		let mut state = RunState::new();
		let outcome = self.collect_all(targets, window, &mut session, &mut state).await;

		// Final persistence happens on every path: completion,
		// interrupt, and fatal recovery failure alike.
		if let Err(err) = self.sink.finalize(&state) {
			warn!(target = "previsao.collect", error = %err, "final persistence failed");
		}

		if let Some(live) = session.take() {
			self.factory.destroy(live).await;
		}

		match outcome {
			Ok(()) => Ok(RunSummary::from_state(&state, false)),
			Err(HarvestError::Interrupted) => Ok(RunSummary::from_state(&state, true)),
			Err(err) => Err(err),
		}
	}

	/// Current session lifecycle state, mostly for observability.
	pub fn session_state(&self) -> SessionState {
		self.session_state
	}

	fn interrupted(&self) -> bool {
		self.interrupt.load(Ordering::SeqCst)
	}

	async fn collect_all(
		&mut self,
		targets: &[Target],
		window: &DateWindow,
		session: &mut Option<SF::Session>,
		state: &mut RunState,
	) -> Result<()> {
		let total = targets.len();

		for (index, target) in targets.iter().enumerate() {
			if self.interrupted() {
				info!(target = "previsao.collect", remaining = total - index, "interrupted, stopping collection");
				return Err(HarvestError::Interrupted);
			}

			info!(
				target = "previsao.collect",
				position = index + 1,
				total,
				target_code = %target,
				"processing target"
			);

			let records = self.collect_target(target, window, session).await?;
			state.append(records);

			let processed = state.mark_processed();
			if processed % self.checkpoint_every == 0 {
				self.write_checkpoint(state);
			}

			if self.interrupted() {
				info!(target = "previsao.collect", remaining = total - index - 1, "interrupted, stopping collection");
				return Err(HarvestError::Interrupted);
			}

			if index + 1 < total {
				tokio::time::sleep(self.pacing.between_targets()).await;
			}
		}

		Ok(())
	}

	/// Runs one target's retry state machine to a terminal state and
	/// returns whatever it collected (empty on exhaustion/interrupt).
	async fn collect_target(
		&mut self,
		target: &Target,
		window: &DateWindow,
		session: &mut Option<SF::Session>,
	) -> Result<Vec<ForecastRecord>> {
		let mut attempts: u32 = 0;
		let mut collected = Vec::new();
		let mut phase = TargetState::Pending;

		loop {
			phase = match phase {
				TargetState::Pending => self.attempt(target, window, session, &mut attempts, &mut collected).await?,
				TargetState::Retrying => {
					if self.interrupted() {
						debug!(target = "previsao.collect", target_code = %target, "interrupted, skipping remaining retries");
						break;
					}
					tokio::time::sleep(self.pacing.retry_backoff()).await;
					self.attempt(target, window, session, &mut attempts, &mut collected).await?
				}
				TargetState::Succeeded => break,
				TargetState::Exhausted => {
					warn!(
						target = "previsao.collect",
						target_code = %target,
						attempts,
						"attempt budget exhausted, moving on with zero records"
					);
					break;
				}
			};
		}

		Ok(collected)
	}

	async fn attempt(
		&mut self,
		target: &Target,
		window: &DateWindow,
		session: &mut Option<SF::Session>,
		attempts: &mut u32,
		collected: &mut Vec<ForecastRecord>,
	) -> Result<TargetState> {
		*attempts += 1;
		debug!(
			target = "previsao.collect",
			target_code = %target,
			attempt = *attempts,
			budget = self.max_attempts,
			"fetching"
		);

		let live = match session.as_mut() {
			Some(live) => live,
			None => return Err(HarvestError::Recreation("no live session to fetch with".to_string())),
		};

		match self.fetcher.fetch(live, target, window).await {
			FetchOutcome::Success(records) => {
				info!(
					target = "previsao.collect",
					target_code = %target,
					records = records.len(),
					attempt = *attempts,
					"target collected"
				);
				collected.extend(records);
				Ok(TargetState::Succeeded)
			}
			FetchOutcome::Empty => {
				debug!(target = "previsao.collect", target_code = %target, attempt = *attempts, "no records extracted");
				Ok(self.next_phase(*attempts))
			}
			FetchOutcome::Timeout => {
				debug!(target = "previsao.collect", target_code = %target, attempt = *attempts, "content wait timed out");
				Ok(self.next_phase(*attempts))
			}
			FetchOutcome::SessionLost(reason) => {
				self.recover(session, &reason).await?;
				// The attempt counter keeps counting across recovery;
				// recreation does not grant a fresh budget.
				Ok(self.next_phase(*attempts))
			}
		}
	}

	fn next_phase(&self, attempts: u32) -> TargetState {
		if attempts >= self.max_attempts {
			TargetState::Exhausted
		} else {
			TargetState::Retrying
		}
	}

	/// Destroys the lost session and creates a replacement. On failure
	/// the session state is terminal and the run must abort (records
	/// already accumulated are persisted by `run`).
	async fn recover(&mut self, session: &mut Option<SF::Session>, reason: &str) -> Result<()> {
		self.session_state = SessionState::Degraded;
		warn!(
			target = "previsao.collect",
			%reason,
			state = %self.session_state,
			"session-level failure, recovering"
		);

		if let Some(dead) = session.take() {
			self.factory.destroy(dead).await;
		}

		self.session_state = SessionState::Recreating;
		tokio::time::sleep(self.pacing.recovery_hold()).await;

		match self.factory.create().await {
			Ok(fresh) => {
				*session = Some(fresh);
				self.session_state = SessionState::Active;
				info!(target = "previsao.collect", state = %self.session_state, "session recreated");
				Ok(())
			}
			Err(err) => {
				self.session_state = SessionState::Dead;
				error!(
					target = "previsao.collect",
					state = %self.session_state,
					error = %err,
					"session recreation failed, aborting run"
				);
				Err(HarvestError::Recreation(err.to_string()))
			}
		}
	}

	fn write_checkpoint(&mut self, state: &mut RunState) {
		match self.sink.checkpoint(state) {
			Ok(()) => {
				state.note_checkpoint();
				info!(
					target = "previsao.collect",
					records = state.len(),
					checkpoint = state.checkpoints(),
					"checkpoint written"
				);
			}
			Err(err) => {
				warn!(
					target = "previsao.collect",
					error = %err,
					"checkpoint write failed, records kept in memory"
				);
			}
		}
	}
}
