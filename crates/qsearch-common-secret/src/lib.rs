// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for credentials.
//!
//! A [`Secret<T>`] holds an upstream API key between the moment it is read
//! from configuration and the moment it is written into an `Authorization`
//! header. Its `Debug`, `Display` and `Serialize` output is always
//! [`REDACTED`], and the inner value is zeroized on drop.
//!
//! ```
//! use qsearch_common_secret::Secret;
//!
//! let api_key = Secret::new("bce-v3/ALTAK-example".to_string());
//! assert_eq!(format!("{api_key}"), "[REDACTED]");
//! assert_eq!(api_key.expose(), "bce-v3/ALTAK-example");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder written wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Every call site is a place the secret leaves
	/// the wrapper, so keep them few.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the wrapped credential is empty or whitespace.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_hide_the_value() {
		let secret = SecretString::from("bce-v3/ALTAK-abc/def");

		let debug = format!("{secret:?}");
		let display = format!("{secret}");

		assert_eq!(debug, "Secret(\"[REDACTED]\")");
		assert_eq!(display, REDACTED);
		assert!(!debug.contains("ALTAK"));
	}

	#[test]
	fn option_of_secret_is_redacted() {
		let secret = Some(SecretString::from("bce-v3/ALTAK-abc/def"));
		assert!(!format!("{secret:?}").contains("ALTAK"));
	}

	#[test]
	fn blank_detection() {
		assert!(SecretString::from("").is_blank());
		assert!(SecretString::from("  \n").is_blank());
		assert!(!SecretString::from("key").is_blank());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serialize_is_redacted_but_deserialize_keeps_value() {
		let json = serde_json::to_string(&SecretString::from("real-key")).unwrap();
		assert_eq!(json, "\"[REDACTED]\"");

		let parsed: SecretString = serde_json::from_str("\"real-key\"").unwrap();
		assert_eq!(parsed.expose(), "real-key");
	}

	proptest! {
		/// Whatever the key looks like, formatting never leaks it.
		#[test]
		fn formatting_never_contains_secret(inner in "[a-zA-Z0-9/_-]{8,64}") {
			prop_assume!(!inner.contains("REDACTED") && !inner.contains("Secret"));

			let secret = SecretString::new(inner.clone());
			let debug_out = format!("{secret:?}");
			let display_out = format!("{secret}");
			prop_assert!(!debug_out.contains(&inner));
			prop_assert!(!display_out.contains(&inner));
		}

		#[test]
		fn expose_returns_original(inner in ".*") {
			let secret = SecretString::new(inner.clone());
			prop_assert_eq!(secret.expose(), &inner);
		}
	}
}
