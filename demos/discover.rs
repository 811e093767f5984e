//! Demonstrates one-shot provider discovery against a mock provider, with compliance
//! violations forwarded to `tracing`.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oidc_rp_config::{
	compliance::TracingComplianceListener, config::OpenIdConfiguration,
	discovery::WELL_KNOWN_PATH, http::ReqwestHttpClient, reqwest::blocking::Client,
};

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

	let server = MockServer::start();
	let discovery_mock = server.mock(|when, then| {
		when.method(GET).path(WELL_KNOWN_PATH);
		then.status(200).header("content-type", "application/json").body(format!(
			"{{\"issuer\":\"{}\",\"authorization_endpoint\":\"{}\",\"token_endpoint\":\"{}\",\"scopes_supported\":[\"openid\",\"email\"]}}",
			server.base_url(),
			server.url("/authorize"),
			server.url("/token"),
		));
	});
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.no_proxy()
			.build()?,
	);
	let mut configuration = OpenIdConfiguration::builder()
		.provider(server.base_url())
		.client_id("demo-client")
		.client_secret("demo-secret")
		.compliance_listener(Arc::new(TracingComplianceListener))
		.build_with(&http_client)?;

	configuration.add_scopes(["openid"]);
	configuration.add_scopes(["email"]);

	println!("Issuer: {}.", configuration.issuer());
	println!("Authorization endpoint: {}.", configuration.authorization_endpoint());
	println!("Token endpoint: {}.", configuration.token_endpoint());
	println!("Requested scopes: {}.", configuration.scopes());

	if let Some(supported) = configuration.metadata().and_then(|m| m.scopes_supported.as_ref()) {
		println!("Provider advertises scopes: {}.", supported.join(" "));
	}

	discovery_mock.assert_calls(1);

	match OpenIdConfiguration::discover("http://127.0.0.1:1", "demo-client", "demo-secret") {
		Ok(_) => println!("Unexpectedly discovered an unreachable provider."),
		Err(e) => println!("Unreachable provider rejected: {e}."),
	}

	Ok(())
}
