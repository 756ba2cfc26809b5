//! Diagnostic hooks for the relay's grant activity.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_relay.request` with a `stage` field
//!   for each section of the logical call.
//! - Enable `metrics` to increment the `oauth2_relay_grant_total` counter for every grant
//!   attempt/success/failure, labeled by `outcome`.
//!
//! Independently of both features, an application-supplied [`GrantObserver`]
//! receives callbacks at the three diagnostic points: before a grant, after a
//! grant (with elapsed time and success flag), and when a 401/403 triggers
//! re-authorization. The default [`NoopObserver`] ignores everything, and its
//! absence never changes relay behavior.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::ClientIdentity};

/// Observer invoked at the relay's diagnostic points.
///
/// All methods default to no-ops so implementations override only the points
/// they care about. Callbacks are infallible and must not block.
pub trait GrantObserver
where
	Self: Send + Sync,
{
	/// A grant call is about to start for the identity.
	fn grant_starting(&self, client: &ClientIdentity) {
		let _ = client;
	}

	/// A grant call finished after `elapsed`, successfully or not.
	fn grant_finished(&self, client: &ClientIdentity, elapsed: StdDuration, succeeded: bool) {
		let _ = (client, elapsed, succeeded);
	}

	/// A 401/403 response triggered re-authorization.
	fn reauthorizing(&self, client: &ClientIdentity, status: u16) {
		let _ = (client, status);
	}
}

/// Observer that ignores every diagnostic point; the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl GrantObserver for NoopObserver {}

/// Outcome labels recorded for each grant attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantOutcome {
	/// Entry to the grant path.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl GrantOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantOutcome::Attempt => "attempt",
			GrantOutcome::Success => "success",
			GrantOutcome::Failure => "failure",
		}
	}
}
impl Display for GrantOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
