// self
use crate::_prelude::*;

/// A span wrapping one discovery fetch.
#[derive(Clone, Debug)]
pub struct DiscoverySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl DiscoverySpan {
	/// Creates a new span tagged with the configured provider.
	pub fn new(provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oidc_rp_config.discovery", provider);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = provider;

			Self {}
		}
	}

	/// Enters the span for the synchronous discovery section.
	pub fn entered(self) -> DiscoverySpanGuard {
		#[cfg(feature = "tracing")]
		{
			DiscoverySpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			DiscoverySpanGuard {}
		}
	}
}

/// RAII guard returned by [`DiscoverySpan::entered`].
pub struct DiscoverySpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for DiscoverySpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("DiscoverySpanGuard(..)")
	}
}

/// Logs the raw discovery document at `debug`.
pub fn log_discovery_document(url: &Url, document: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(url = %url, document, "Fetched discovery document.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (url, document);
	}
}

/// Logs a mismatch between the configured provider and the advertised issuer at `warn`.
pub fn log_issuer_mismatch(provider: &str, issuer: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			provider,
			issuer,
			"The issuer in the discovery document does not match the configured provider."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (provider, issuer);
	}
}
