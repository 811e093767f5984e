//! Configuration-level error types shared by the builder, discovery, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any discovery I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider discovery failed or produced an unusable document.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
}
impl Error {
	/// Returns true when the error is the blanket "invalid identity provider" failure.
	pub fn is_discovery_failure(&self) -> bool {
		matches!(self, Self::Discovery(DiscoveryError::InvalidProvider { .. }))
	}

	/// Returns the name of the required discovery field that was missing, if any.
	pub fn missing_field(&self) -> Option<&'static str> {
		match self {
			Self::Discovery(DiscoveryError::MissingField { field }) => Some(*field),
			_ => None,
		}
	}
}

/// Caller-side configuration failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No provider URL was configured.
	#[error("Provider was not configured.")]
	MissingProvider,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A persisted configuration violates a construction invariant.
	#[error("Persisted configuration has an invalid `{field}`.")]
	InvalidConfiguration {
		/// Name of the offending field.
		field: &'static str,
	},
	/// Relying-party settings could not be decoded.
	#[error("Settings are invalid at `{path}`.")]
	InvalidSettings {
		/// Path to the offending value, `.` for the document root.
		path: String,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Failures raised while discovering provider metadata.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// The discovery document could not be fetched or decoded.
	#[error("Invalid identity provider `{provider}`.")]
	InvalidProvider {
		/// Provider URL as configured by the caller.
		provider: String,
		/// Original failure inside the discovery pipeline.
		#[source]
		source: DiscoveryFailure,
	},
	/// The discovery document lacks a required string field.
	#[error("Discovery document is missing `{field}`.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
}
impl DiscoveryError {
	/// Wraps a pipeline failure as an invalid identity provider error.
	pub fn invalid_provider(
		provider: impl Into<String>,
		source: impl Into<DiscoveryFailure>,
	) -> Self {
		Self::InvalidProvider { provider: provider.into(), source: source.into() }
	}
}

/// Causes collapsed into [`DiscoveryError::InvalidProvider`].
#[derive(Debug, ThisError)]
pub enum DiscoveryFailure {
	/// Provider URL plus the well-known path is not a valid absolute URL.
	#[error("Discovery URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
	/// Fetching the document failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Document body is not valid JSON.
	#[error("Discovery document is malformed JSON.")]
	Malformed(#[from] serde_json::Error),
	/// Document body is JSON but not an object.
	#[error("Discovery document is not a JSON object.")]
	NotAnObject,
	/// Document object could not be decoded into provider metadata.
	#[error("Discovery document could not be decoded at `{}`.", .0.path())]
	Decode(#[from] serde_path_to_error::Error<serde_json::Error>),
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while fetching the discovery document.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Discovery endpoint answered with a non-success status.
	#[error("Discovery endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while fetching the discovery document.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
