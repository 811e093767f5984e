//! Relying-party configuration for a single OpenID provider.
//!
//! [`OpenIdConfiguration`] is assembled once, typically at startup, by
//! [`OpenIdConfigurationBuilder`]. Either both endpoints are supplied and trusted, or the
//! builder runs provider discovery exactly once and freezes the result. Construction is
//! all-or-nothing: callers receive a fully populated value or an error.

/// Builder API for assembling configurations.
pub mod builder;
/// Serde-loadable relying-party settings.
pub mod settings;

pub use builder::*;
pub use settings::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, ScopeList},
	discovery::ProviderMetadata,
	error::ConfigError,
};

/// Immutable relying-party configuration.
///
/// `provider`, `issuer`, both endpoints, and the client credentials never change after
/// construction; only the scope list grows, through [`add_scopes`](Self::add_scopes).
/// `issuer` always equals the configured provider, even when the discovery document
/// advertises a different issuer.
///
/// The value serializes with every field, the client secret included, so it can be
/// persisted and reloaded without a second discovery fetch. Deserializing re-checks the
/// construction invariants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationRecord")]
pub struct OpenIdConfiguration {
	provider: String,
	issuer: String,
	authorization_endpoint: String,
	token_endpoint: String,
	client_id: String,
	client_secret: ClientSecret,
	scopes: ScopeList,
	#[serde(skip_serializing_if = "Option::is_none")]
	metadata: Option<ProviderMetadata>,
}
impl OpenIdConfiguration {
	/// Creates a new, empty builder.
	pub fn builder() -> OpenIdConfigurationBuilder {
		OpenIdConfigurationBuilder::new()
	}

	/// Discovers both endpoints for `provider` using the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn discover(
		provider: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<ClientSecret>,
	) -> Result<Self> {
		Self::builder().provider(provider).client_id(client_id).client_secret(client_secret).build()
	}

	/// Trusts the supplied endpoints; discovery only runs if either one is empty.
	#[cfg(feature = "reqwest")]
	pub fn with_endpoints(
		provider: impl Into<String>,
		authorization_endpoint: impl Into<String>,
		token_endpoint: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<ClientSecret>,
	) -> Result<Self> {
		Self::builder()
			.provider(provider)
			.authorization_endpoint(authorization_endpoint)
			.token_endpoint(token_endpoint)
			.client_id(client_id)
			.client_secret(client_secret)
			.build()
	}

	/// Provider base URL exactly as configured.
	pub fn provider(&self) -> &str {
		&self.provider
	}

	/// Trusted issuer identity; always equal to [`provider`](Self::provider).
	pub fn issuer(&self) -> &str {
		&self.issuer
	}

	/// Authorization endpoint URL.
	pub fn authorization_endpoint(&self) -> &str {
		&self.authorization_endpoint
	}

	/// Token endpoint URL.
	pub fn token_endpoint(&self) -> &str {
		&self.token_endpoint
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret shared with the provider.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}

	/// Scopes accumulated so far, in insertion order.
	pub fn scopes(&self) -> &ScopeList {
		&self.scopes
	}

	/// Appends scopes in order. Empty input (or `None`) is a no-op; duplicates are kept.
	pub fn add_scopes<I, S>(&mut self, scopes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes);
	}

	/// Discovery document used to build this configuration, if discovery ran.
	pub fn metadata(&self) -> Option<&ProviderMetadata> {
		self.metadata.as_ref()
	}

	/// Returns true when the endpoints came from discovery rather than the caller.
	pub fn is_discovered(&self) -> bool {
		self.metadata.is_some()
	}
}
impl TryFrom<ConfigurationRecord> for OpenIdConfiguration {
	type Error = ConfigError;

	fn try_from(record: ConfigurationRecord) -> Result<Self, Self::Error> {
		if record.provider.is_empty() {
			return Err(ConfigError::MissingProvider);
		}
		if record.issuer != record.provider {
			return Err(ConfigError::InvalidConfiguration { field: "issuer" });
		}
		if record.authorization_endpoint.is_empty() {
			return Err(ConfigError::InvalidConfiguration {
				field: ProviderMetadata::AUTHORIZATION_ENDPOINT,
			});
		}
		if record.token_endpoint.is_empty() {
			return Err(ConfigError::InvalidConfiguration { field: ProviderMetadata::TOKEN_ENDPOINT });
		}

		Ok(Self {
			provider: record.provider,
			issuer: record.issuer,
			authorization_endpoint: record.authorization_endpoint,
			token_endpoint: record.token_endpoint,
			client_id: record.client_id,
			client_secret: record.client_secret,
			scopes: record.scopes,
			metadata: record.metadata,
		})
	}
}

#[derive(Deserialize)]
struct ConfigurationRecord {
	provider: String,
	issuer: String,
	authorization_endpoint: String,
	token_endpoint: String,
	#[serde(default)]
	client_id: String,
	#[serde(default)]
	client_secret: ClientSecret,
	#[serde(default)]
	scopes: ScopeList,
	#[serde(default)]
	metadata: Option<ProviderMetadata>,
}
