// self
use crate::{
	_prelude::*,
	auth::ClientSecret,
	config::{OpenIdConfiguration, OpenIdConfigurationBuilder},
	error::ConfigError,
	http::DiscoveryHttpClient,
};

/// Plain relying-party settings, typically loaded from a config file or environment.
///
/// Every field is optional on the wire. Missing endpoints trigger discovery at build
/// time and `scopes` are appended to the built configuration in order.
///
/// ```
/// use oidc_rp_config::config::RelyingPartySettings;
///
/// let settings = RelyingPartySettings::from_json_str(
/// 	r#"{"provider":"https://idp.example","client_id":"app","scopes":["openid"]}"#,
/// )
/// .unwrap();
///
/// assert_eq!(settings.provider.as_deref(), Some("https://idp.example"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelyingPartySettings {
	/// Provider base URL.
	pub provider: Option<String>,
	/// Trusted authorization endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorization_endpoint: Option<String>,
	/// Trusted token endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_endpoint: Option<String>,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: ClientSecret,
	/// Scopes appended after the configuration is built.
	pub scopes: Vec<String>,
}
impl RelyingPartySettings {
	/// Decodes settings from a JSON document, reporting the path of the first bad value.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let settings = serde_path_to_error::deserialize(&mut de).map_err(|e| {
			ConfigError::InvalidSettings { path: e.path().to_string(), source: e.into_inner() }
		})?;

		de.end().map_err(|source| ConfigError::InvalidSettings { path: ".".into(), source })?;

		Ok(settings)
	}

	/// Converts the settings into a builder. Scopes are not carried over.
	pub fn into_builder(self) -> OpenIdConfigurationBuilder {
		self.split().0
	}

	/// Builds the configuration over reqwest and appends the configured scopes.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<OpenIdConfiguration> {
		let (builder, scopes) = self.split();
		let mut configuration = builder.build()?;

		configuration.add_scopes(scopes);

		Ok(configuration)
	}

	/// Builds the configuration through `http` and appends the configured scopes.
	pub fn build_with<C>(self, http: &C) -> Result<OpenIdConfiguration>
	where
		C: ?Sized + DiscoveryHttpClient,
	{
		let (builder, scopes) = self.split();
		let mut configuration = builder.build_with(http)?;

		configuration.add_scopes(scopes);

		Ok(configuration)
	}

	fn split(self) -> (OpenIdConfigurationBuilder, Vec<String>) {
		let builder = OpenIdConfigurationBuilder {
			provider: self.provider,
			authorization_endpoint: self.authorization_endpoint,
			token_endpoint: self.token_endpoint,
			client_id: self.client_id,
			client_secret: self.client_secret,
			compliance_listener: None,
		};

		(builder, self.scopes)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::StubHttpClient;

	#[test]
	fn settings_decode_with_defaults() {
		let settings = RelyingPartySettings::from_json_str(r#"{"provider":"https://idp.example"}"#)
			.expect("Minimal settings should decode.");

		assert_eq!(settings.provider.as_deref(), Some("https://idp.example"));
		assert!(settings.authorization_endpoint.is_none());
		assert!(settings.client_id.is_empty());
		assert!(settings.client_secret.is_empty());
		assert!(settings.scopes.is_empty());
	}

	#[test]
	fn invalid_settings_report_the_offending_path() {
		let err = RelyingPartySettings::from_json_str(r#"{"scopes":["openid",7]}"#)
			.expect_err("Non-string scope must fail.");

		assert!(matches!(&err, ConfigError::InvalidSettings { path, .. } if path == "scopes[1]"));

		let err = RelyingPartySettings::from_json_str(r#"{} {}"#)
			.expect_err("Trailing content must fail.");

		assert!(matches!(&err, ConfigError::InvalidSettings { path, .. } if path == "."));
	}

	#[test]
	fn build_with_appends_scopes_after_trusted_build() {
		let http = StubHttpClient::status(500);
		let settings = RelyingPartySettings {
			provider: Some("https://idp.example".into()),
			authorization_endpoint: Some("https://idp.example/auth".into()),
			token_endpoint: Some("https://idp.example/token".into()),
			client_id: "app".into(),
			client_secret: "shh".into(),
			scopes: vec!["openid".into(), "email".into()],
		};
		let configuration = settings.build_with(&http).expect("Trusted settings should build.");

		assert_eq!(http.calls(), 0);
		assert_eq!(configuration.client_id(), "app");
		assert_eq!(configuration.scopes().joined(), "openid email");
	}

	#[test]
	fn into_builder_drops_scopes_only() {
		let settings = RelyingPartySettings {
			provider: Some("https://idp.example".into()),
			scopes: vec!["openid".into()],
			..Default::default()
		};
		let builder = settings.into_builder();

		assert_eq!(builder.provider.as_deref(), Some("https://idp.example"));
		assert!(builder.compliance_listener.is_none());
	}
}
