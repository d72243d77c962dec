// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Normalization of the username typed by the operator.

use std::fmt;

use crate::error::ProvisionError;

/// A candidate's GitHub username after normalization.
///
/// Operators paste handles from chat, so `@octocat` and ` octocat ` both
/// become `octocat`. Exactly one leading `@` is removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateHandle(String);

impl CandidateHandle {
	/// Trim, drop one leading `@`, trim again.
	///
	/// Fails with [`ProvisionError::InvalidHandle`] when nothing is left or
	/// the remainder contains whitespace.
	pub fn parse(raw: &str) -> Result<Self, ProvisionError> {
		let trimmed = raw.trim();
		let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

		if handle.is_empty() || handle.chars().any(char::is_whitespace) {
			return Err(ProvisionError::InvalidHandle {
				input: trimmed.to_string(),
			});
		}
		Ok(Self(handle.to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CandidateHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CandidateHandle {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn plain_handle_is_kept() {
		assert_eq!(CandidateHandle::parse("octocat").unwrap().as_str(), "octocat");
	}

	#[test]
	fn leading_at_and_padding_are_stripped() {
		assert_eq!(CandidateHandle::parse("@octocat").unwrap().as_str(), "octocat");
		assert_eq!(
			CandidateHandle::parse("  @ octocat\n").unwrap().as_str(),
			"octocat"
		);
	}

	#[test]
	fn only_one_at_is_stripped() {
		assert_eq!(CandidateHandle::parse("@@octocat").unwrap().as_str(), "@octocat");
	}

	#[test]
	fn empty_inputs_are_rejected() {
		for raw in ["", "   ", "@", " @ "] {
			assert!(
				matches!(
					CandidateHandle::parse(raw),
					Err(ProvisionError::InvalidHandle { .. })
				),
				"{raw:?} should be rejected"
			);
		}
	}

	#[test]
	fn inner_whitespace_is_rejected() {
		let err = CandidateHandle::parse("octo cat").unwrap_err();
		assert_eq!(err.to_string(), "\"octo cat\" is not a valid GitHub username.");
	}

	proptest! {
		#[test]
		fn decoration_does_not_change_the_handle(
			handle in "[a-zA-Z0-9][a-zA-Z0-9-]{0,38}",
			at in proptest::bool::ANY,
			left in " {0,3}",
			right in " {0,3}",
		) {
			let raw = format!("{left}{}{handle}{right}", if at { "@" } else { "" });
			let parsed = CandidateHandle::parse(&raw).unwrap();
			prop_assert_eq!(parsed.as_str(), handle.as_str());
		}
	}
}
