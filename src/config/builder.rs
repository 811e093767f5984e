// crates.io
use serde_json::Value;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::{ClientSecret, ScopeList},
	compliance::{OidcSpecReference, SpecComplianceListener},
	config::OpenIdConfiguration,
	discovery::{self, ProviderMetadata},
	error::ConfigError,
	http::DiscoveryHttpClient,
	obs::{self, DiscoveryOutcome, DiscoverySpan},
};

/// Builder for [`OpenIdConfiguration`] values.
///
/// Empty strings are treated the same as unset values: an empty provider fails with
/// [`ConfigError::MissingProvider`] and an empty endpoint triggers discovery.
#[derive(Clone, Default)]
pub struct OpenIdConfigurationBuilder {
	/// Provider base URL; required.
	pub provider: Option<String>,
	/// Trusted authorization endpoint.
	pub authorization_endpoint: Option<String>,
	/// Trusted token endpoint.
	pub token_endpoint: Option<String>,
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: ClientSecret,
	/// Listener notified about non-fatal discovery deviations.
	pub compliance_listener: Option<Arc<dyn SpecComplianceListener>>,
}
impl OpenIdConfigurationBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the provider base URL.
	pub fn provider(mut self, provider: impl Into<String>) -> Self {
		self.provider = Some(provider.into());

		self
	}

	/// Sets a trusted authorization endpoint.
	pub fn authorization_endpoint(mut self, url: impl Into<String>) -> Self {
		self.authorization_endpoint = Some(url.into());

		self
	}

	/// Sets a trusted token endpoint.
	pub fn token_endpoint(mut self, url: impl Into<String>) -> Self {
		self.token_endpoint = Some(url.into());

		self
	}

	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = client_id.into();

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<ClientSecret>) -> Self {
		self.client_secret = secret.into();

		self
	}

	/// Registers a listener for discovery-time compliance violations.
	pub fn compliance_listener(mut self, listener: Arc<dyn SpecComplianceListener>) -> Self {
		self.compliance_listener = Some(listener);

		self
	}

	/// Builds the configuration, discovering endpoints over reqwest when needed.
	///
	/// The reqwest client is only constructed when discovery actually runs.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<OpenIdConfiguration> {
		self.assemble(|provider| {
			let http = ReqwestHttpClient::try_default()?;

			Ok(discovery::discover(&http, provider)?)
		})
	}

	/// Builds the configuration, discovering endpoints through `http` when needed.
	pub fn build_with<C>(self, http: &C) -> Result<OpenIdConfiguration>
	where
		C: ?Sized + DiscoveryHttpClient,
	{
		self.assemble(|provider| Ok(discovery::discover(http, provider)?))
	}

	fn assemble<F>(self, discover: F) -> Result<OpenIdConfiguration>
	where
		F: FnOnce(&str) -> Result<ProviderMetadata>,
	{
		let provider =
			self.provider.filter(|provider| !provider.is_empty()).ok_or(ConfigError::MissingProvider)?;
		let authorization = self.authorization_endpoint.filter(|url| !url.is_empty());
		let token = self.token_endpoint.filter(|url| !url.is_empty());
		let (authorization_endpoint, token_endpoint, metadata) = match (authorization, token) {
			(Some(authorization), Some(token)) => {
				obs::record_discovery_outcome(DiscoveryOutcome::Skipped);

				(authorization, token, None)
			},
			_ => {
				let _guard = DiscoverySpan::new(&provider).entered();

				obs::record_discovery_outcome(DiscoveryOutcome::Attempt);

				match resolve(&provider, discover, self.compliance_listener.as_deref()) {
					Ok((authorization, token, metadata)) => {
						obs::record_discovery_outcome(DiscoveryOutcome::Success);

						(authorization, token, Some(metadata))
					},
					Err(e) => {
						obs::record_discovery_outcome(DiscoveryOutcome::Failure);

						return Err(e);
					},
				}
			},
		};

		Ok(OpenIdConfiguration {
			issuer: provider.clone(),
			provider,
			authorization_endpoint,
			token_endpoint,
			client_id: self.client_id,
			client_secret: self.client_secret,
			scopes: ScopeList::default(),
			metadata,
		})
	}
}
impl Debug for OpenIdConfigurationBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OpenIdConfigurationBuilder")
			.field("provider", &self.provider)
			.field("authorization_endpoint", &self.authorization_endpoint)
			.field("token_endpoint", &self.token_endpoint)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("compliance_listener", &self.compliance_listener.is_some())
			.finish()
	}
}

fn resolve<F>(
	provider: &str,
	discover: F,
	listener: Option<&dyn SpecComplianceListener>,
) -> Result<(String, String, ProviderMetadata)>
where
	F: FnOnce(&str) -> Result<ProviderMetadata>,
{
	let metadata = discover(provider)?;
	let (authorization, token) = metadata.required_endpoints()?;

	if let Some(advertised) = metadata.mismatched_issuer(provider) {
		let issuer = match advertised {
			Value::String(issuer) => issuer.clone(),
			other => other.to_string(),
		};

		obs::log_issuer_mismatch(provider, &issuer);

		if let Some(listener) = listener {
			listener.on_spec_compliance_violation(
				&OidcSpecReference::DiscoveryIssuerMismatch,
				&format!("Expected issuer `{provider}` but the provider advertised `{issuer}`."),
			);
		}
	}
	if let Some(listener) = listener {
		report_insecure_endpoint(listener, ProviderMetadata::AUTHORIZATION_ENDPOINT, &authorization);
		report_insecure_endpoint(listener, ProviderMetadata::TOKEN_ENDPOINT, &token);
	}

	Ok((authorization, token, metadata))
}

fn report_insecure_endpoint(listener: &dyn SpecComplianceListener, field: &str, endpoint: &str) {
	let secure = Url::parse(endpoint).map(|url| url.scheme() == "https").unwrap_or(false);

	if !secure {
		listener.on_spec_compliance_violation(
			&OidcSpecReference::DiscoveryInsecureEndpoint,
			&format!("Discovered `{field}` is not an https URL: `{endpoint}`."),
		);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::StubHttpClient, compliance::ViolationLog, error::Error};

	const DOCUMENT: &str = r#"{
		"issuer": "https://idp.example",
		"authorization_endpoint": "https://idp.example/auth",
		"token_endpoint": "https://idp.example/token"
	}"#;

	fn builder() -> OpenIdConfigurationBuilder {
		OpenIdConfiguration::builder().provider("https://idp.example").client_id("c").client_secret("s")
	}

	#[test]
	fn trusted_endpoints_skip_discovery() {
		let http = StubHttpClient::json(DOCUMENT);
		let configuration = builder()
			.authorization_endpoint("https://a.example/auth")
			.token_endpoint("https://a.example/token")
			.build_with(&http)
			.expect("Trusted endpoints should build.");

		assert_eq!(http.calls(), 0);
		assert_eq!(configuration.authorization_endpoint(), "https://a.example/auth");
		assert_eq!(configuration.token_endpoint(), "https://a.example/token");
		assert!(!configuration.is_discovered());
	}

	#[test]
	fn missing_or_empty_provider_fails_before_io() {
		let http = StubHttpClient::json(DOCUMENT);

		for builder in [OpenIdConfiguration::builder(), OpenIdConfiguration::builder().provider("")] {
			let err = builder.build_with(&http).expect_err("Provider is required.");

			assert!(matches!(err, Error::Config(ConfigError::MissingProvider)));
		}

		assert_eq!(http.calls(), 0);
	}

	#[test]
	fn one_missing_endpoint_triggers_discovery_and_replaces_both() {
		let http = StubHttpClient::json(DOCUMENT);
		let configuration = builder()
			.authorization_endpoint("https://ignored.example/auth")
			.token_endpoint("")
			.build_with(&http)
			.expect("Discovery should succeed.");

		assert_eq!(http.requests(), vec!["https://idp.example/.well-known/openid-configuration"]);
		assert_eq!(configuration.authorization_endpoint(), "https://idp.example/auth");
		assert_eq!(configuration.token_endpoint(), "https://idp.example/token");
		assert_eq!(configuration.issuer(), "https://idp.example");
		assert!(configuration.is_discovered());
	}

	#[test]
	fn discovery_failures_abort_the_build() {
		let err = builder().build_with(&StubHttpClient::status(404)).expect_err("404 must fail.");

		assert!(err.is_discovery_failure());

		let err = builder()
			.build_with(&StubHttpClient::json(r#"{"authorization_endpoint":"https://x/a"}"#))
			.expect_err("Missing token endpoint must fail.");

		assert_eq!(err.missing_field(), Some("token_endpoint"));
	}

	#[test]
	fn issuer_mismatch_is_reported_but_not_fatal() {
		let log = Arc::new(ViolationLog::default());
		let configuration = OpenIdConfiguration::builder()
			.provider("https://idp.example/")
			.client_id("c")
			.compliance_listener(log.clone())
			.build_with(&StubHttpClient::json(DOCUMENT))
			.expect("Issuer mismatch is only a warning.");

		assert_eq!(configuration.issuer(), "https://idp.example/");
		assert_eq!(log.count("OIDC_DISCOVERY_4_3_ISSUER_MISMATCH"), 1);
		assert_eq!(log.len(), 1);
	}

	#[test]
	fn non_string_issuer_counts_as_a_mismatch() {
		let log = Arc::new(ViolationLog::default());
		let http = StubHttpClient::json(
			r#"{
				"issuer": 42,
				"authorization_endpoint": "https://idp.example/a",
				"token_endpoint": "https://idp.example/t"
			}"#,
		);
		let configuration = builder()
			.compliance_listener(log.clone())
			.build_with(&http)
			.expect("A non-string issuer is only a warning.");
		let violations = log.take();

		assert_eq!(configuration.issuer(), "https://idp.example");
		assert_eq!(violations.len(), 1);
		assert_eq!(violations[0].name, "OIDC_DISCOVERY_4_3_ISSUER_MISMATCH");
		assert!(violations[0].details.contains("`42`"));
	}

	#[test]
	fn insecure_discovered_endpoints_are_reported() {
		let log = Arc::new(ViolationLog::default());
		let http = StubHttpClient::json(
			r#"{
				"issuer": "https://idp.example",
				"authorization_endpoint": "http://idp.example/auth",
				"token_endpoint": "not a url"
			}"#,
		);

		builder()
			.compliance_listener(log.clone())
			.build_with(&http)
			.expect("Insecure endpoints are only reported.");

		let violations = log.take();

		assert_eq!(violations.len(), 2);
		assert!(violations.iter().all(|v| v.name == "OIDC_DISCOVERY_3_INSECURE_ENDPOINT"));
		assert!(violations[0].details.contains("authorization_endpoint"));
		assert!(violations[1].details.contains("token_endpoint"));
	}

	#[test]
	fn debug_hides_secret_and_listener() {
		let rendered = format!("{:?}", builder().compliance_listener(Arc::new(ViolationLog::default())));

		assert!(rendered.contains("compliance_listener: true"));
		assert!(!rendered.contains("\"s\""));
	}
}
