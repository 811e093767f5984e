//! Observability helpers for provider discovery.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap the discovery fetch in an `oidc_rp_config.discovery` span (with
//!   the `provider` field), log the raw discovered document at `debug`, and log issuer
//!   mismatches at `warn`.
//! - Enable `metrics` to increment the `oidc_rp_config_discovery_total` counter for every
//!   attempt/success/failure/skip, labeled by `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each configuration build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiscoveryOutcome {
	/// Discovery fetch is about to start.
	Attempt,
	/// Discovery produced a usable document.
	Success,
	/// Discovery failed and the build was aborted.
	Failure,
	/// Both endpoints were supplied, so no fetch was performed.
	Skipped,
}
impl DiscoveryOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DiscoveryOutcome::Attempt => "attempt",
			DiscoveryOutcome::Success => "success",
			DiscoveryOutcome::Failure => "failure",
			DiscoveryOutcome::Skipped => "skipped",
		}
	}
}
impl Display for DiscoveryOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
