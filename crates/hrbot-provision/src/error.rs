// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Failure taxonomy of the provisioning pipeline.
//!
//! The `Display` text of a [`ProvisionError`] is what the operator sees in
//! chat. HTTP statuses and response bodies are kept in the variants for
//! logging but only the candidate handle and repository name are ever
//! interpolated into the message.

use std::fmt;

use hrbot_github::{AccountType, GitHubError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
	Verification,
	Creation,
	Invitation,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Stage::Verification => "verification",
			Stage::Creation => "creation",
			Stage::Invitation => "invitation",
		})
	}
}

/// Stable classification of a failure, independent of message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
	InvalidHandle,
	UserNotFound,
	NotAUserAccount,
	RepositoryAlreadyExists,
	RepositoryCreationFailed,
	InvitationFailed,
	UnexpectedFailure,
}

/// What happened to the generated repository after the invitation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanup {
	/// Cleanup is disabled; the repository stays.
	Skipped,
	/// The repository was deleted again.
	Removed,
	/// Deletion was attempted and failed; the repository stays.
	Failed,
}

fn cleanup_note(cleanup: &Cleanup, full_name: &str) -> String {
	match cleanup {
		Cleanup::Skipped => format!(
			"The repository {full_name} was created but the invitation failed; manual cleanup required."
		),
		Cleanup::Removed => format!("The repository {full_name} was deleted again."),
		Cleanup::Failed => format!(
			"The repository {full_name} was created but could not be deleted; manual cleanup required."
		),
	}
}

fn leftover_note(repository: &Option<String>) -> String {
	match repository {
		Some(full_name) => format!(
			" The repository {full_name} was created and may need manual cleanup."
		),
		None => String::new(),
	}
}

fn invalid_handle_message(input: &str) -> String {
	if input.trim_start_matches('@').trim().is_empty() {
		"Please provide a GitHub username.".to_string()
	} else {
		format!("\"{input}\" is not a valid GitHub username.")
	}
}

/// A terminal failure of one provisioning run.
#[derive(Debug, Error)]
pub enum ProvisionError {
	/// The handle was empty or malformed after normalization.
	#[error("{}", invalid_handle_message(.input))]
	InvalidHandle { input: String },

	/// The user lookup did not answer `200 OK`.
	#[error("Could not find user")]
	UserNotFound { handle: String, status: u16 },

	/// The account exists but is an organization, bot, etc.
	#[error("\"{handle}\" is not a user.")]
	NotAUserAccount {
		handle: String,
		account_type: AccountType,
	},

	/// Generation answered `422`; usually a repository from an earlier run.
	#[error("Failed to create the repo {full_name}. Check that it's not there already.")]
	RepositoryAlreadyExists { full_name: String },

	/// Generation answered anything else but `201`.
	#[error("Failed to create the repo {full_name}.")]
	RepositoryCreationFailed { full_name: String, status: u16 },

	/// The collaborator call answered neither `201` nor `204`.
	#[error("Failed to invite {handle} as collaborator. {}", cleanup_note(.cleanup, .full_name))]
	InvitationFailed {
		handle: String,
		full_name: String,
		status: u16,
		cleanup: Cleanup,
	},

	/// Transport or decoding trouble in any stage. `repository` is set when
	/// the repository already exists at that point.
	#[error("An error was encountered: `{source}`{}", leftover_note(.repository))]
	Unexpected {
		stage: Stage,
		source: GitHubError,
		repository: Option<String>,
	},
}

impl ProvisionError {
	pub fn stage(&self) -> Stage {
		match self {
			ProvisionError::InvalidHandle { .. }
			| ProvisionError::UserNotFound { .. }
			| ProvisionError::NotAUserAccount { .. } => Stage::Verification,
			ProvisionError::RepositoryAlreadyExists { .. }
			| ProvisionError::RepositoryCreationFailed { .. } => Stage::Creation,
			ProvisionError::InvitationFailed { .. } => Stage::Invitation,
			ProvisionError::Unexpected { stage, .. } => *stage,
		}
	}

	pub fn kind(&self) -> FailureKind {
		match self {
			ProvisionError::InvalidHandle { .. } => FailureKind::InvalidHandle,
			ProvisionError::UserNotFound { .. } => FailureKind::UserNotFound,
			ProvisionError::NotAUserAccount { .. } => FailureKind::NotAUserAccount,
			ProvisionError::RepositoryAlreadyExists { .. } => FailureKind::RepositoryAlreadyExists,
			ProvisionError::RepositoryCreationFailed { .. } => FailureKind::RepositoryCreationFailed,
			ProvisionError::InvitationFailed { .. } => FailureKind::InvitationFailed,
			ProvisionError::Unexpected { .. } => FailureKind::UnexpectedFailure,
		}
	}

	/// Raw HTTP status behind the failure, when there was one.
	pub fn status(&self) -> Option<u16> {
		match self {
			ProvisionError::UserNotFound { status, .. }
			| ProvisionError::RepositoryCreationFailed { status, .. }
			| ProvisionError::InvitationFailed { status, .. } => Some(*status),
			ProvisionError::RepositoryAlreadyExists { .. } => Some(422),
			ProvisionError::Unexpected { source, .. } => source.status(),
			ProvisionError::InvalidHandle { .. } | ProvisionError::NotAUserAccount { .. } => None,
		}
	}

	pub(crate) fn unexpected(stage: Stage, source: GitHubError) -> Self {
		ProvisionError::Unexpected {
			stage,
			source,
			repository: None,
		}
	}

	/// An unexpected invitation error; `full_name` exists and is reported.
	pub(crate) fn unexpected_after_creation(source: GitHubError, full_name: &str) -> Self {
		ProvisionError::Unexpected {
			stage: Stage::Invitation,
			source,
			repository: Some(full_name.to_string()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verification_messages() {
		let not_found = ProvisionError::UserNotFound {
			handle: "ghost".to_string(),
			status: 404,
		};
		assert_eq!(not_found.to_string(), "Could not find user");
		assert_eq!(not_found.stage(), Stage::Verification);

		let org = ProvisionError::NotAUserAccount {
			handle: "github".to_string(),
			account_type: AccountType::Organization,
		};
		assert_eq!(org.to_string(), "\"github\" is not a user.");
		assert_eq!(org.kind(), FailureKind::NotAUserAccount);
	}

	#[test]
	fn empty_handle_message() {
		let err = ProvisionError::InvalidHandle {
			input: "@".to_string(),
		};
		assert_eq!(err.to_string(), "Please provide a GitHub username.");
		assert_eq!(err.stage(), Stage::Verification);
	}

	#[test]
	fn creation_messages_name_the_repository() {
		let exists = ProvisionError::RepositoryAlreadyExists {
			full_name: "acme-challenges/octocat-challenge".to_string(),
		};
		assert_eq!(
			exists.to_string(),
			"Failed to create the repo acme-challenges/octocat-challenge. Check that it's not there already."
		);
		assert_eq!(exists.stage(), Stage::Creation);

		let failed = ProvisionError::RepositoryCreationFailed {
			full_name: "acme-challenges/octocat-challenge".to_string(),
			status: 500,
		};
		assert_eq!(
			failed.to_string(),
			"Failed to create the repo acme-challenges/octocat-challenge."
		);
		assert!(!failed.to_string().contains("500"));
	}

	#[test]
	fn invitation_message_reports_cleanup() {
		let failure = |cleanup| ProvisionError::InvitationFailed {
			handle: "octocat".to_string(),
			full_name: "acme-challenges/octocat-challenge".to_string(),
			status: 403,
			cleanup,
		};

		let skipped = failure(Cleanup::Skipped).to_string();
		assert!(skipped.starts_with("Failed to invite octocat as collaborator."));
		assert!(skipped.contains("manual cleanup required"));

		let removed = failure(Cleanup::Removed).to_string();
		assert!(removed.contains("was deleted again"));
		assert!(!removed.contains("manual cleanup"));

		assert!(failure(Cleanup::Failed)
			.to_string()
			.contains("could not be deleted; manual cleanup required"));
	}

	#[test]
	fn unexpected_keeps_its_stage() {
		let err = ProvisionError::unexpected(
			Stage::Creation,
			GitHubError::InvalidResponse("missing full_name".to_string()),
		);
		assert_eq!(err.stage(), Stage::Creation);
		assert_eq!(err.kind(), FailureKind::UnexpectedFailure);
		assert_eq!(
			err.to_string(),
			"An error was encountered: `Invalid response from GitHub: missing full_name`"
		);
	}

	#[test]
	fn unexpected_invitation_error_names_the_repository() {
		let err = ProvisionError::unexpected_after_creation(
			GitHubError::InvalidResponse("eof".to_string()),
			"acme-challenges/octocat-challenge",
		);
		assert_eq!(err.stage(), Stage::Invitation);
		assert_eq!(err.kind(), FailureKind::UnexpectedFailure);
		assert_eq!(
			err.to_string(),
			"An error was encountered: `Invalid response from GitHub: eof` The repository \
			 acme-challenges/octocat-challenge was created and may need manual cleanup."
		);
	}

	#[test]
	fn stage_serializes_lowercase() {
		assert_eq!(
			serde_json::to_string(&Stage::Invitation).unwrap(),
			"\"invitation\""
		);
		assert_eq!(Stage::Creation.to_string(), "creation");
	}
}
