// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the GitHub client.

use thiserror::Error;

/// Errors returned by [`crate::GitHubApi`] calls.
///
/// `Api` carries the status GitHub answered with; callers classify on it.
/// `Network` and `InvalidResponse` mean the exchange itself broke down.
#[derive(Debug, Error)]
pub enum GitHubError {
	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// GitHub answered with a status the endpoint does not treat as success.
	#[error("GitHub API error: {status} - {message}")]
	Api { status: u16, message: String },

	/// The response body could not be decoded.
	#[error("Invalid response from GitHub: {0}")]
	InvalidResponse(String),

	#[error("Configuration error: {0}")]
	Config(String),
}

impl GitHubError {
	pub fn api(status: u16, message: impl Into<String>) -> Self {
		Self::Api {
			status,
			message: message.into(),
		}
	}

	/// The HTTP status for `Api` errors.
	pub fn status(&self) -> Option<u16> {
		match self {
			GitHubError::Api { status, .. } => Some(*status),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_only_for_api_errors() {
		assert_eq!(GitHubError::api(422, "Unprocessable").status(), Some(422));
		assert_eq!(GitHubError::InvalidResponse("eof".to_string()).status(), None);
		assert_eq!(GitHubError::Config("bad url".to_string()).status(), None);
	}

	#[test]
	fn api_error_display() {
		let err = GitHubError::api(404, "Not Found");
		assert_eq!(err.to_string(), "GitHub API error: 404 - Not Found");
	}
}
