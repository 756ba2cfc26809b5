//! Grant-parameter bags and their merge semantics.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Grant type sent to the token endpoint unless a configured or per-request
/// parameter overrides it.
pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";

/// Ordered string-to-JSON parameter map handed to the grant client.
///
/// The map is kept sorted so its canonical serialization (and therefore the
/// cache key derived from it) is stable regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantParams(BTreeMap<String, Value>);
impl GrantParams {
	/// Creates an empty parameter bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the bag containing only the built-in `grant_type` default.
	pub fn builtin() -> Self {
		let mut map = BTreeMap::new();

		map.insert("grant_type".into(), DEFAULT_GRANT_TYPE.into());

		Self(map)
	}

	/// Adds or replaces a parameter, consuming and returning the bag.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Removes a parameter if present, consuming and returning the bag.
	pub fn without(mut self, key: &str) -> Self {
		self.0.remove(key);

		self
	}

	/// Looks up a parameter by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Returns `true` if no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of parameters in the bag.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates over the parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Merges the built-in default, `defaults`, and `overrides` in that
	/// precedence order; later bags win on key collision.
	pub fn merged(defaults: &Self, overrides: &Self) -> Self {
		let mut map = Self::builtin().0;

		map.extend(defaults.0.iter().map(|(k, v)| (k.clone(), v.clone())));
		map.extend(overrides.0.iter().map(|(k, v)| (k.clone(), v.clone())));

		Self(map)
	}
}
impl<K, V> FromIterator<(K, V)> for GrantParams
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}
