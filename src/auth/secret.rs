//! Client secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted client secret keeping the shared secret out of logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string verbatim.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns true if no secret was configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<String> for ClientSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for ClientSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
