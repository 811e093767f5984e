//! Specification compliance notifications.
//!
//! Protocol checks report deviations through [`SpecComplianceListener`], a pure
//! notification sink: listeners return nothing and must not panic, and call frequency
//! and ordering are defined by whichever check detected the violation. Each
//! notification carries a [`SpecReference`] naming the violated section.
//!
//! The configuration builder reports two discovery-time deviations (see
//! [`OidcSpecReference`]); both are non-fatal and the build continues.

// self
use crate::_prelude::*;

/// Reference to a specific place in a specification.
pub trait SpecReference {
	/// Short unique name for this reference.
	fn name(&self) -> &str;

	/// URL of the specification, including the section anchor when possible.
	fn url(&self) -> &str;

	/// Human-readable description of the requirement being referenced.
	fn description(&self) -> &str;
}

/// Listener notified whenever a specification violation is detected.
pub trait SpecComplianceListener
where
	Self: Send + Sync,
{
	/// Called with the violated reference and details about the violation.
	fn on_spec_compliance_violation(&self, reference: &dyn SpecReference, details: &str);
}
impl<F> SpecComplianceListener for F
where
	F: Send + Sync + Fn(&dyn SpecReference, &str),
{
	fn on_spec_compliance_violation(&self, reference: &dyn SpecReference, details: &str) {
		self(reference, details)
	}
}

/// OpenID Connect Discovery requirements checked while building a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OidcSpecReference {
	/// The advertised `issuer` differs from the configured provider URL.
	DiscoveryIssuerMismatch,
	/// A discovered endpoint does not use the `https` scheme.
	DiscoveryInsecureEndpoint,
}
impl SpecReference for OidcSpecReference {
	fn name(&self) -> &str {
		match self {
			Self::DiscoveryIssuerMismatch => "OIDC_DISCOVERY_4_3_ISSUER_MISMATCH",
			Self::DiscoveryInsecureEndpoint => "OIDC_DISCOVERY_3_INSECURE_ENDPOINT",
		}
	}

	fn url(&self) -> &str {
		match self {
			Self::DiscoveryIssuerMismatch =>
				"https://openid.net/specs/openid-connect-discovery-1_0.html#ProviderConfigurationValidation",
			Self::DiscoveryInsecureEndpoint =>
				"https://openid.net/specs/openid-connect-discovery-1_0.html#ProviderMetadata",
		}
	}

	fn description(&self) -> &str {
		match self {
			Self::DiscoveryIssuerMismatch =>
				"The issuer value returned MUST be identical to the Issuer URL that was used as the prefix to /.well-known/openid-configuration.",
			Self::DiscoveryInsecureEndpoint =>
				"The authorization and token endpoint URLs MUST use the https scheme.",
		}
	}
}
impl Display for OidcSpecReference {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.name())
	}
}

/// Owned snapshot of one reported violation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedViolation {
	/// Reference name.
	pub name: String,
	/// Reference URL.
	pub url: String,
	/// Reference description.
	pub description: String,
	/// Violation details supplied by the check.
	pub details: String,
}
impl RecordedViolation {
	/// Captures `reference` and `details` into owned strings.
	pub fn capture(reference: &dyn SpecReference, details: &str) -> Self {
		Self {
			name: reference.name().to_owned(),
			url: reference.url().to_owned(),
			description: reference.description().to_owned(),
			details: details.to_owned(),
		}
	}
}
impl SpecReference for RecordedViolation {
	fn name(&self) -> &str {
		&self.name
	}

	fn url(&self) -> &str {
		&self.url
	}

	fn description(&self) -> &str {
		&self.description
	}
}

/// Listener that keeps every violation in memory for later inspection.
#[derive(Debug, Default)]
pub struct ViolationLog(Mutex<Vec<RecordedViolation>>);
impl ViolationLog {
	/// Returns a copy of the recorded violations, oldest first.
	pub fn violations(&self) -> Vec<RecordedViolation> {
		self.0.lock().clone()
	}

	/// Drains the recorded violations, oldest first.
	pub fn take(&self) -> Vec<RecordedViolation> {
		std::mem::take(&mut *self.0.lock())
	}

	/// Number of recorded violations.
	pub fn len(&self) -> usize {
		self.0.lock().len()
	}

	/// Returns true if nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_empty()
	}

	/// Counts recorded violations with the given reference name.
	pub fn count(&self, name: &str) -> usize {
		self.0.lock().iter().filter(|violation| violation.name == name).count()
	}
}
impl SpecComplianceListener for ViolationLog {
	fn on_spec_compliance_violation(&self, reference: &dyn SpecReference, details: &str) {
		self.0.lock().push(RecordedViolation::capture(reference, details));
	}
}

/// Listener that forwards violations to `tracing` at `warn`.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingComplianceListener;
#[cfg(feature = "tracing")]
impl SpecComplianceListener for TracingComplianceListener {
	fn on_spec_compliance_violation(&self, reference: &dyn SpecReference, details: &str) {
		tracing::warn!(
			reference = reference.name(),
			url = reference.url(),
			details,
			"Specification compliance violation detected."
		);
	}
}
