//! OpenID Connect relying-party configuration with one-shot provider discovery.
//!
//! Build an [`OpenIdConfiguration`](config::OpenIdConfiguration) once at startup: supply both
//! endpoints to trust them as-is, or leave either one out and the builder fetches
//! `/.well-known/openid-configuration` exactly once. Deviations from OpenID Connect Discovery
//! are reported through a [`SpecComplianceListener`](compliance::SpecComplianceListener).

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod compliance;
pub mod config;
pub mod discovery;
pub mod error;
pub mod http;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
	use crate::{error::TransportError, http::DiscoveryHttpClient};

	/// In-memory transport that answers every request with the same canned response and
	/// records the requested URLs.
	#[derive(Debug)]
	pub struct StubHttpClient {
		response: std::result::Result<String, u16>,
		requests: Mutex<Vec<String>>,
	}
	impl StubHttpClient {
		/// Answers every request with `body`.
		pub fn json(body: impl Into<String>) -> Self {
			Self { response: Ok(body.into()), requests: Mutex::default() }
		}

		/// Answers every request with the given non-success HTTP status.
		pub fn status(status: u16) -> Self {
			Self { response: Err(status), requests: Mutex::default() }
		}

		/// URLs requested so far, oldest first.
		pub fn requests(&self) -> Vec<String> {
			self.requests.lock().clone()
		}

		/// Number of requests issued so far.
		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}
	}
	impl DiscoveryHttpClient for StubHttpClient {
		fn get(&self, url: &Url) -> Result<String, TransportError> {
			self.requests.lock().push(url.to_string());

			match &self.response {
				Ok(body) => Ok(body.clone()),
				Err(status) => Err(TransportError::Status { status: *status }),
			}
		}
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.no_proxy()
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tracing_subscriber as _};
