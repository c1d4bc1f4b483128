//! Injectable pacing policy.
//!
//! All deliberate waiting in the collection loop (retry backoff,
//! inter-target politeness, recovery hold) is drawn from a policy so
//! tests can substitute zero delays without touching orchestration
//! logic. The production policy jitters uniformly within its bounds to
//! avoid a mechanical request cadence.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

/// Source of the collection loop's deliberate delays.
pub trait Pacing: Send + Sync {
	/// Wait before a retry attempt (attempts 2..=N).
	fn retry_backoff(&self) -> Duration;
	/// Wait between finished targets.
	fn between_targets(&self) -> Duration;
	/// Wait between destroying a lost session and recreating it.
	fn recovery_hold(&self) -> Duration;
}

/// Production policy: uniform jitter within each range.
pub struct JitteredPacing {
	retry_secs: RangeInclusive<f64>,
	target_secs: RangeInclusive<f64>,
	recovery: Duration,
}

impl JitteredPacing {
	pub fn new(retry_secs: RangeInclusive<f64>, target_secs: RangeInclusive<f64>, recovery: Duration) -> Self {
		Self { retry_secs, target_secs, recovery }
	}
}

impl Default for JitteredPacing {
	fn default() -> Self {
		Self::new(2.0..=5.0, 3.0..=8.0, Duration::from_secs(5))
	}
}

impl Pacing for JitteredPacing {
	fn retry_backoff(&self) -> Duration {
		jittered(&self.retry_secs)
	}

	fn between_targets(&self) -> Duration {
		jittered(&self.target_secs)
	}

	fn recovery_hold(&self) -> Duration {
		self.recovery
	}
}

fn jittered(range: &RangeInclusive<f64>) -> Duration {
	let secs = rand::rng().random_range(range.clone());
	Duration::from_secs_f64(secs)
}

/// Zero-delay policy for tests.
pub struct NoPacing;

impl Pacing for NoPacing {
	fn retry_backoff(&self) -> Duration {
		Duration::ZERO
	}

	fn between_targets(&self) -> Duration {
		Duration::ZERO
	}

	fn recovery_hold(&self) -> Duration {
		Duration::ZERO
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn jitter_stays_within_bounds() {
		let pacing = JitteredPacing::default();
		for _ in 0..100 {
			let backoff = pacing.retry_backoff();
			assert!(backoff >= Duration::from_secs(2) && backoff <= Duration::from_secs(5));
			let pause = pacing.between_targets();
			assert!(pause >= Duration::from_secs(3) && pause <= Duration::from_secs(8));
		}
	}

	#[test]
	fn no_pacing_is_zero() {
		assert_eq!(NoPacing.retry_backoff(), Duration::ZERO);
		assert_eq!(NoPacing.between_targets(), Duration::ZERO);
		assert_eq!(NoPacing.recovery_hold(), Duration::ZERO);
	}
}
