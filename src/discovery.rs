//! OpenID Connect provider discovery.
//!
//! Discovery appends [`WELL_KNOWN_PATH`] to the provider URL (after stripping exactly one
//! trailing `/`), fetches the document once through a [`DiscoveryHttpClient`], and decodes
//! it into [`ProviderMetadata`]. Every failure along that pipeline (bad URL, transport,
//! malformed or non-object JSON) surfaces as [`DiscoveryError::InvalidProvider`] with the
//! original cause attached. Checking the required endpoints is a separate step so a
//! missing field stays distinguishable from a broken provider.

// crates.io
use serde::Deserializer;
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	error::{DiscoveryError, DiscoveryFailure},
	http::DiscoveryHttpClient,
	obs,
};

/// Path appended to the provider URL to locate the discovery document.
pub const WELL_KNOWN_PATH: &str = "/.well-known/openid-configuration";

/// Builds the discovery document URL for `provider`.
///
/// Exactly one trailing `/` is stripped before [`WELL_KNOWN_PATH`] is appended, so
/// `https://idp.example/` and `https://idp.example` resolve to the same document.
pub fn discovery_url(provider: &str) -> Result<Url, url::ParseError> {
	let base = provider.strip_suffix('/').unwrap_or(provider);

	Url::parse(&format!("{base}{WELL_KNOWN_PATH}"))
}

/// Fetches and decodes the discovery document for `provider`.
///
/// Performs exactly one `GET`. The raw document is logged at `debug` before it is parsed.
pub fn discover<C>(http: &C, provider: &str) -> Result<ProviderMetadata, DiscoveryError>
where
	C: ?Sized + DiscoveryHttpClient,
{
	fetch(http, provider).map_err(|source| DiscoveryError::invalid_provider(provider, source))
}

fn fetch<C>(http: &C, provider: &str) -> Result<ProviderMetadata, DiscoveryFailure>
where
	C: ?Sized + DiscoveryHttpClient,
{
	let url = discovery_url(provider)?;
	let body = http.get(&url)?;

	obs::log_discovery_document(&url, &body);

	ProviderMetadata::from_json(&body)
}

/// Provider metadata published at the discovery endpoint.
///
/// Only `authorization_endpoint` and `token_endpoint` are required by the builder and
/// `issuer` is compared against the configured provider; the remaining typed fields are
/// surfaced for downstream flows. A typed string field holding a value of the wrong JSON
/// type decodes as `None` instead of failing the whole document. `issuer` is kept as raw
/// JSON, so any present value (including `null`) is compared. Fields without a typed slot
/// are kept verbatim in [`additional`](Self::additional).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
	/// Issuer identifier the provider asserts, verbatim.
	#[serde(default, deserialize_with = "present_value", skip_serializing_if = "Option::is_none")]
	pub issuer: Option<Value>,
	/// Authorization endpoint URL.
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub authorization_endpoint: Option<String>,
	/// Token endpoint URL.
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub token_endpoint: Option<String>,
	/// UserInfo endpoint URL.
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub userinfo_endpoint: Option<String>,
	/// JWK Set document URL.
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub jwks_uri: Option<String>,
	/// RP-initiated logout endpoint URL.
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub end_session_endpoint: Option<String>,
	/// Scopes the provider advertises; non-string entries are dropped.
	#[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Option::is_none")]
	pub scopes_supported: Option<Vec<String>>,
	/// Every other member of the document.
	#[serde(flatten)]
	pub additional: Map<String, Value>,
}
impl ProviderMetadata {
	/// Name of the required authorization endpoint member.
	pub const AUTHORIZATION_ENDPOINT: &'static str = "authorization_endpoint";
	/// Name of the required token endpoint member.
	pub const TOKEN_ENDPOINT: &'static str = "token_endpoint";

	/// Decodes a discovery document body.
	///
	/// The body must be a JSON object; any other JSON value is rejected with
	/// [`DiscoveryFailure::NotAnObject`].
	pub fn from_json(body: &str) -> Result<Self, DiscoveryFailure> {
		let value = serde_json::from_str::<Value>(body)?;

		if !value.is_object() {
			return Err(DiscoveryFailure::NotAnObject);
		}

		Ok(serde_path_to_error::deserialize(value)?)
	}

	/// Returns the authorization and token endpoints, in that order.
	///
	/// Fails with [`DiscoveryError::MissingField`] naming the first endpoint that is
	/// absent, not a string, or empty.
	pub fn required_endpoints(&self) -> Result<(String, String), DiscoveryError> {
		let authorization =
			required(self.authorization_endpoint.as_deref(), Self::AUTHORIZATION_ENDPOINT)?;
		let token = required(self.token_endpoint.as_deref(), Self::TOKEN_ENDPOINT)?;

		Ok((authorization.to_owned(), token.to_owned()))
	}

	/// Advertised issuer, if it is a string.
	pub fn issuer(&self) -> Option<&str> {
		self.issuer.as_ref().and_then(Value::as_str)
	}

	/// Returns the advertised issuer when it is present and is not the string `provider`.
	///
	/// The comparison is exact: `https://idp.example/` and `https://idp.example` differ, and
	/// a non-string issuer such as `42` or `null` always mismatches.
	pub fn mismatched_issuer(&self, provider: &str) -> Option<&Value> {
		self.issuer.as_ref().filter(|issuer| issuer.as_str() != Some(provider))
	}

	/// Looks up any member of the document by name, typed or not.
	pub fn get(&self, key: &str) -> Option<Value> {
		match key {
			"issuer" => self.issuer.clone(),
			Self::AUTHORIZATION_ENDPOINT => self.authorization_endpoint.clone().map(Value::String),
			Self::TOKEN_ENDPOINT => self.token_endpoint.clone().map(Value::String),
			"userinfo_endpoint" => self.userinfo_endpoint.clone().map(Value::String),
			"jwks_uri" => self.jwks_uri.clone().map(Value::String),
			"end_session_endpoint" => self.end_session_endpoint.clone().map(Value::String),
			"scopes_supported" => self
				.scopes_supported
				.clone()
				.map(|scopes| Value::Array(scopes.into_iter().map(Value::String).collect())),
			_ => self.additional.get(key).cloned(),
		}
	}
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, DiscoveryError> {
	value.filter(|v| !v.is_empty()).ok_or(DiscoveryError::MissingField { field })
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
	D: Deserializer<'de>,
{
	Value::deserialize(deserializer).map(Some)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(Some(s)),
		_ => Ok(None),
	}
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::Array(items) => Ok(Some(
			items
				.into_iter()
				.filter_map(|item| match item {
					Value::String(s) => Some(s),
					_ => None,
				})
				.collect(),
		)),
		_ => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::TransportError;

	struct FixedBody(std::result::Result<&'static str, u16>);
	impl DiscoveryHttpClient for FixedBody {
		fn get(&self, _url: &Url) -> std::result::Result<String, TransportError> {
			self.0.map(str::to_owned).map_err(|status| TransportError::Status { status })
		}
	}

	#[test]
	fn discovery_url_strips_exactly_one_slash() {
		let expected = "https://idp.example/.well-known/openid-configuration";

		assert_eq!(
			discovery_url("https://idp.example").expect("URL should parse.").as_str(),
			expected
		);
		assert_eq!(
			discovery_url("https://idp.example/").expect("URL should parse.").as_str(),
			expected
		);
		assert_eq!(
			discovery_url("https://idp.example/realms/acme/")
				.expect("URL should parse.")
				.as_str(),
			"https://idp.example/realms/acme/.well-known/openid-configuration"
		);
		assert_eq!(
			discovery_url("https://idp.example//").expect("URL should parse.").as_str(),
			"https://idp.example//.well-known/openid-configuration"
		);
	}

	#[test]
	fn discovery_url_rejects_relative_providers() {
		assert!(discovery_url("idp.example").is_err());
	}

	#[test]
	fn metadata_decodes_known_and_additional_fields() {
		let metadata = ProviderMetadata::from_json(
			r#"{
				"issuer": "https://idp.example",
				"authorization_endpoint": "https://idp.example/auth",
				"token_endpoint": "https://idp.example/token",
				"jwks_uri": "https://idp.example/jwks",
				"scopes_supported": ["openid", 7, "email"],
				"claims_parameter_supported": true
			}"#,
		)
		.expect("Discovery document should decode.");

		assert_eq!(metadata.issuer(), Some("https://idp.example"));
		assert_eq!(metadata.jwks_uri.as_deref(), Some("https://idp.example/jwks"));
		assert_eq!(
			metadata.scopes_supported,
			Some(vec!["openid".to_string(), "email".to_string()])
		);
		assert_eq!(metadata.get("claims_parameter_supported"), Some(Value::Bool(true)));
		assert_eq!(
			metadata.get("token_endpoint"),
			Some(Value::String("https://idp.example/token".into()))
		);
		assert!(metadata.userinfo_endpoint.is_none());
	}

	#[test]
	fn wrong_typed_endpoint_reads_as_missing() {
		let metadata = ProviderMetadata::from_json(
			r#"{"authorization_endpoint": 42, "token_endpoint": "https://idp.example/token"}"#,
		)
		.expect("Wrong-typed members must not fail decoding.");
		let err = metadata.required_endpoints().expect_err("Numeric endpoint is not usable.");

		assert!(matches!(err, DiscoveryError::MissingField { field: "authorization_endpoint" }));
	}

	#[test]
	fn required_endpoints_check_presence_in_order() {
		let metadata = ProviderMetadata::from_json(r#"{"authorization_endpoint": "https://a"}"#)
			.expect("Partial document should decode.");

		assert!(matches!(
			metadata.required_endpoints(),
			Err(DiscoveryError::MissingField { field: "token_endpoint" })
		));

		let metadata = ProviderMetadata::from_json(
			r#"{"authorization_endpoint": "", "token_endpoint": "https://t"}"#,
		)
		.expect("Document with empty endpoint should decode.");

		assert!(matches!(
			metadata.required_endpoints(),
			Err(DiscoveryError::MissingField { field: "authorization_endpoint" })
		));
	}

	#[test]
	fn non_object_and_malformed_bodies_are_rejected() {
		assert!(matches!(ProviderMetadata::from_json("[]"), Err(DiscoveryFailure::NotAnObject)));
		assert!(matches!(
			ProviderMetadata::from_json("\"issuer\""),
			Err(DiscoveryFailure::NotAnObject)
		));
		assert!(matches!(
			ProviderMetadata::from_json("{\"issuer\":"),
			Err(DiscoveryFailure::Malformed(_))
		));
	}

	#[test]
	fn mismatched_issuer_is_exact_and_optional() {
		let metadata = ProviderMetadata {
			issuer: Some(Value::from("https://idp.example")),
			..Default::default()
		};

		assert_eq!(metadata.mismatched_issuer("https://idp.example"), None);
		assert_eq!(
			metadata.mismatched_issuer("https://idp.example/"),
			Some(&Value::from("https://idp.example"))
		);
		assert_eq!(ProviderMetadata::default().mismatched_issuer("https://idp.example"), None);
	}

	#[test]
	fn non_string_issuer_is_present_and_mismatched() {
		let metadata = ProviderMetadata::from_json(r#"{"issuer": 42}"#)
			.expect("Numeric issuer must not fail decoding.");

		assert_eq!(metadata.issuer(), None);
		assert_eq!(metadata.mismatched_issuer("https://idp.example"), Some(&Value::from(42)));
		assert_eq!(metadata.get("issuer"), Some(Value::from(42)));

		let metadata = ProviderMetadata::from_json(r#"{"issuer": null}"#)
			.expect("Null issuer must not fail decoding.");

		assert_eq!(metadata.mismatched_issuer("https://idp.example"), Some(&Value::Null));

		let metadata =
			ProviderMetadata::from_json("{}").expect("Document without issuer should decode.");

		assert_eq!(metadata.mismatched_issuer("https://idp.example"), None);
	}

	#[test]
	fn discover_wraps_every_pipeline_failure() {
		let err = discover(&FixedBody(Err(404)), "https://idp.example")
			.expect_err("HTTP 404 must fail discovery.");

		assert!(matches!(
			err,
			DiscoveryError::InvalidProvider {
				source: DiscoveryFailure::Transport(TransportError::Status { status: 404 }),
				..
			}
		));

		let err = discover(&FixedBody(Ok("not json")), "https://idp.example")
			.expect_err("Malformed JSON must fail discovery.");

		assert!(matches!(
			err,
			DiscoveryError::InvalidProvider { source: DiscoveryFailure::Malformed(_), .. }
		));

		let err = discover(&FixedBody(Ok("{}")), "relative/provider")
			.expect_err("Relative provider must fail discovery.");

		assert!(matches!(
			err,
			DiscoveryError::InvalidProvider { source: DiscoveryFailure::InvalidUrl(_), .. }
		));
	}

	#[test]
	fn discover_returns_metadata_without_checking_fields() {
		let metadata = discover(&FixedBody(Ok("{\"issuer\":\"x\"}")), "https://idp.example")
			.expect("Field checks are left to the caller.");

		assert_eq!(metadata.issuer(), Some("x"));
	}
}
