//! Transport primitives for discovery document retrieval.
//!
//! The module exposes [`DiscoveryHttpClient`], the crate's only dependency on an HTTP
//! stack. Discovery issues exactly one `GET` per configuration build and needs the full
//! response body as text, so the contract is deliberately small and synchronous. The
//! default implementation, [`ReqwestHttpClient`], wraps `reqwest::blocking::Client`.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, error::TransportError};

/// Synchronous HTTP transport used to fetch provider discovery documents.
///
/// Implementations perform a plain `GET` against `url` and return the body as text.
/// Non-success HTTP statuses must be reported as [`TransportError::Status`] so the
/// builder never tries to parse an error page as provider metadata. No custom headers,
/// retries, or redirect policies are required beyond what the transport does by default.
pub trait DiscoveryHttpClient
where
	Self: Send + Sync,
{
	/// Fetches `url` and returns the complete response body.
	fn get(&self, url: &Url) -> Result<String, TransportError>;
}
impl<T> DiscoveryHttpClient for Arc<T>
where
	T: ?Sized + DiscoveryHttpClient,
{
	fn get(&self, url: &Url) -> Result<String, TransportError> {
		(**self).get(url)
	}
}
impl<T> DiscoveryHttpClient for &T
where
	T: ?Sized + DiscoveryHttpClient,
{
	fn get(&self, url: &Url) -> Result<String, TransportError> {
		(**self).get(url)
	}
}

/// Thin wrapper around the blocking [`ReqwestClient`] so shared HTTP behavior lives in
/// one place.
///
/// The blocking client owns an internal runtime; build and use it from a plain thread
/// (application startup, `spawn_blocking`) rather than from inside an async worker.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing blocking reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with reqwest's default settings.
	pub fn try_default() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl DiscoveryHttpClient for ReqwestHttpClient {
	fn get(&self, url: &Url) -> Result<String, TransportError> {
		let response = self.0.get(url.clone()).send()?;
		let status = response.status();

		if !status.is_success() {
			return Err(TransportError::Status { status: status.as_u16() });
		}

		Ok(response.text()?)
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::_preludet::test_reqwest_http_client;

	#[test]
	fn reqwest_client_returns_body_and_maps_status() {
		let server = MockServer::start();
		let ok = server.mock(|when, then| {
			when.method(GET).path("/ok");
			then.status(200).body("{\"issuer\":\"x\"}");
		});
		let _missing = server.mock(|when, then| {
			when.method(GET).path("/missing");
			then.status(404);
		});
		let http = test_reqwest_http_client();
		let url = |path: &str| Url::parse(&server.url(path)).expect("Mock URL should parse.");

		assert_eq!(http.get(&url("/ok")).expect("200 should return the body."), "{\"issuer\":\"x\"}");
		assert!(matches!(
			http.get(&url("/missing")),
			Err(TransportError::Status { status: 404 })
		));

		ok.assert_calls(1);
	}
}
