//! Demonstrates building a configuration from settings with trusted endpoints, which never
//! performs a network request.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oidc_rp_config::config::{OpenIdConfiguration, RelyingPartySettings};

fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start();
	let discovery_mock = server.mock(|when, then| {
		when.any_request();
		then.status(500);
	});
	let settings = RelyingPartySettings::from_json_str(&format!(
		r#"{{
			"provider": "{}",
			"authorization_endpoint": "https://login.example.com/authorize",
			"token_endpoint": "https://login.example.com/token",
			"client_id": "demo-client",
			"client_secret": "demo-secret",
			"scopes": ["openid", "profile"]
		}}"#,
		server.base_url()
	))?;
	let configuration = settings.build()?;

	println!("Authorization endpoint: {}.", configuration.authorization_endpoint());
	println!("Token endpoint: {}.", configuration.token_endpoint());
	println!("Scopes: {}.", configuration.scopes());
	println!("Client secret: {}.", configuration.client_secret());

	discovery_mock.assert_calls(0);

	let shorthand = OpenIdConfiguration::with_endpoints(
		"https://login.example.com",
		"https://login.example.com/authorize",
		"https://login.example.com/token",
		"demo-client",
		"demo-secret",
	)?;

	println!("Shorthand issuer: {}.", shorthand.issuer());

	Ok(())
}
