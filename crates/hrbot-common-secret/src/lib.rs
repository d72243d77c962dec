// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret handling for hrbot.
//!
//! The GitHub credential is the only secret the bot holds. It travels as a
//! [`SecretString`] from the environment to the `Authorization` header and
//! nowhere else: formatting, serializing or tracing it yields [`REDACTED`].
//!
//! ```
//! use hrbot_common_secret::SecretString;
//!
//! let token = SecretString::new("ghp_example".to_string());
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "ghp_example");
//! ```

pub mod env;

use std::fmt;
use zeroize::Zeroize;

pub use env::{load_secret_env, require_secret_env, RequiredSecretError, SecretEnvError};

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// Wrapper that keeps a sensitive value out of logs and is zeroed on drop.
///
/// There is deliberately no `Deref`; call [`Secret::expose`] at the single
/// place the raw value is needed.
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

	/// Borrow the raw value.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the wrapped string is empty or whitespace only.
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
	fn debug_and_display_hide_token() {
		let token = SecretString::new("ghp_live_token".to_string());

		assert_eq!(format!("{token}"), REDACTED);
		let debug = format!("{token:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains("ghp_live_token"));
	}

	#[test]
	fn optional_secret_debug_is_redacted() {
		let token: Option<SecretString> = Some(Secret::new("ghp_live_token".to_string()));
		assert!(!format!("{token:?}").contains("ghp_live_token"));
	}

	#[test]
	fn expose_gives_back_raw_value() {
		let token = SecretString::new("ghp_live_token".to_string());
		assert_eq!(token.expose(), "ghp_live_token");
		assert_eq!(token.clone(), token);
	}

	#[test]
	fn blank_detection() {
		assert!(SecretString::new(String::new()).is_blank());
		assert!(SecretString::new("  \n".to_string()).is_blank());
		assert!(!SecretString::new("x".to_string()).is_blank());
	}

	#[cfg(feature = "serde")]
	#[test]
	fn serde_redacts_on_the_way_out_only() {
		let token: SecretString = serde_json::from_str(r#""ghp_from_json""#).unwrap();
		assert_eq!(token.expose(), "ghp_from_json");

		let json = serde_json::to_string(&token).unwrap();
		assert_eq!(json, format!("\"{REDACTED}\""));
	}

	proptest! {
		#[test]
		fn formatted_output_never_leaks(inner in "[a-zA-Z0-9_]{4,40}") {
			prop_assume!(!REDACTED.contains(&inner));
			prop_assume!(!"Secret".contains(&inner));

			let token = SecretString::new(inner.clone());
			let debug = format!("{:?}", token);
			let shown = token.to_string();
			prop_assert!(!debug.contains(&inner));
			prop_assert!(!shown.contains(&inner));
		}
	}
}
