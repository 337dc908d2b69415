//! Secure string handling for sensitive data like the upstream API key
//!
//! `SecretString` zeroizes its contents on drop and redacts itself in
//! Debug/Display/serialization output so the bearer token never leaks
//! into logs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that clears itself from memory when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Expose the secret value.
	///
	/// Use sparingly; prefer passing the `SecretString` itself around.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretString")
			.field("inner", &"[REDACTED]")
			.finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

// Serialization always redacts; secrets only flow IN via config.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secret = String::deserialize(deserializer)?;
		Ok(SecretString::new(secret))
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	let mut result = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		result |= x ^ y;
	}
	result == 0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exposes_value_on_request_only() {
		let secret = SecretString::from("vapi-key-123");
		assert_eq!(secret.expose_secret(), "vapi-key-123");
		assert_eq!(secret.len(), 12);
		assert!(!secret.is_empty());
	}

	#[test]
	fn debug_and_display_redact() {
		let secret = SecretString::from("super-secret");
		assert!(!format!("{:?}", secret).contains("super-secret"));
		assert_eq!(format!("{}", secret), "[REDACTED]");
	}

	#[test]
	fn serialization_redacts_deserialization_loads() {
		let secret = SecretString::from("token");
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");

		let loaded: SecretString = serde_json::from_str("\"from-config\"").unwrap();
		assert_eq!(loaded.expose_secret(), "from-config");
	}

	#[test]
	fn equality_is_value_based() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
	}
}
