//! Ordered scope accumulation for relying-party requests.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Ordered, append-only list of OAuth scopes.
///
/// Unlike a normalized scope set, the list keeps the caller's order and does not
/// deduplicate: `openid profile` followed by `profile` yields three entries. Entries
/// are stored verbatim; validating scope syntax is left to the provider.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a list seeded with the provided scopes, in iteration order.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list = Self::default();

		list.extend(scopes);

		list
	}

	/// Appends scopes to the end of the list, in iteration order.
	///
	/// An empty iterator (or `None`) leaves the list unchanged.
	pub fn extend<I, S>(&mut self, scopes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.0.extend(scopes.into_iter().map(Into::into));
	}

	/// Number of entries, duplicates included.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes were added.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if any entry equals `scope`.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in insertion order.
	pub fn iter(&self) -> ScopeIter<'_> {
		ScopeIter { inner: self.0.iter() }
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	/// Space-delimited value suitable for an OAuth `scope` parameter.
	pub fn joined(&self) -> String {
		self.0.join(" ")
	}
}
impl AsRef<[String]> for ScopeList {
	fn as_ref(&self) -> &[String] {
		self.as_slice()
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.joined())
	}
}
impl<S> FromIterator<S> for ScopeList
where
	S: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self::new(iter)
	}
}
impl From<Vec<String>> for ScopeList {
	fn from(value: Vec<String>) -> Self {
		Self(value)
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
