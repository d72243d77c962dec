// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Values produced by each stage, and the final result of a run.

use crate::error::{FailureKind, ProvisionError, Stage};
use crate::handle::CandidateHandle;

const GITHUB_WEB_URL: &str = "https://github.com";
const EXISTING_MEMBER_WARNING: &str =
	"Warning: an existing collaborator or organization member was invited. Was that intended?";

/// A handle that GitHub confirmed to be a personal account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
	pub handle: CandidateHandle,
	/// Canonical profile page, used to link the handle in messages.
	pub profile_url: String,
}

/// The repository GitHub reported as created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
	/// `org/name` exactly as GitHub returned it.
	pub full_name: String,
	pub html_url: String,
}

impl RepositoryRecord {
	pub(crate) fn new(full_name: String, html_url: Option<String>) -> Self {
		let html_url = html_url.unwrap_or_else(|| format!("{GITHUB_WEB_URL}/{full_name}"));
		Self {
			full_name,
			html_url,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
	/// A pending invitation was sent to the candidate.
	NewlyInvited,
	/// The candidate already had access through the organization or an
	/// earlier grant and was added without an invitation.
	AlreadyMemberOrCollaborator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationRecord {
	pub target_user: String,
	pub repository_full_name: String,
	pub status: InvitationStatus,
	/// Where the candidate accepts the invitation, or the repository itself
	/// when no invitation was needed.
	pub invitation_url: String,
}

impl InvitationRecord {
	pub(crate) fn invited(
		identity: &Identity,
		repository: &RepositoryRecord,
		html_url: Option<String>,
	) -> Self {
		Self {
			target_user: identity.handle.to_string(),
			repository_full_name: repository.full_name.clone(),
			status: InvitationStatus::NewlyInvited,
			invitation_url: html_url
				.unwrap_or_else(|| format!("{}/invitations", repository.html_url)),
		}
	}

	pub(crate) fn already_member(identity: &Identity, repository: &RepositoryRecord) -> Self {
		Self {
			target_user: identity.handle.to_string(),
			repository_full_name: repository.full_name.clone(),
			status: InvitationStatus::AlreadyMemberOrCollaborator,
			invitation_url: repository.html_url.clone(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct ProvisionSuccess {
	pub message: String,
	pub identity: Identity,
	pub repository: RepositoryRecord,
	pub invitation: InvitationRecord,
}

impl ProvisionSuccess {
	pub(crate) fn new(
		identity: Identity,
		repository: RepositoryRecord,
		invitation: InvitationRecord,
	) -> Self {
		let message = success_message(&identity, &invitation);
		Self {
			message,
			identity,
			repository,
			invitation,
		}
	}

	/// True when the 204 path was taken and the message carries a warning.
	pub fn has_warning(&self) -> bool {
		self.invitation.status == InvitationStatus::AlreadyMemberOrCollaborator
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionFailure {
	pub stage: Stage,
	pub kind: FailureKind,
	pub message: String,
}

impl From<&ProvisionError> for ProvisionFailure {
	fn from(err: &ProvisionError) -> Self {
		Self {
			stage: err.stage(),
			kind: err.kind(),
			message: err.to_string(),
		}
	}
}

/// The single value a run hands back to the workflow.
#[derive(Debug, Clone)]
pub enum ProvisionOutcome {
	Success(ProvisionSuccess),
	Failure(ProvisionFailure),
}

impl ProvisionOutcome {
	pub fn is_success(&self) -> bool {
		matches!(self, ProvisionOutcome::Success(_))
	}

	pub fn message(&self) -> &str {
		match self {
			ProvisionOutcome::Success(success) => &success.message,
			ProvisionOutcome::Failure(failure) => &failure.message,
		}
	}

	pub fn success(&self) -> Option<&ProvisionSuccess> {
		match self {
			ProvisionOutcome::Success(success) => Some(success),
			ProvisionOutcome::Failure(_) => None,
		}
	}

	pub fn failure(&self) -> Option<&ProvisionFailure> {
		match self {
			ProvisionOutcome::Success(_) => None,
			ProvisionOutcome::Failure(failure) => Some(failure),
		}
	}
}

/// Chat message for a completed run. The handle is rendered as a Slack
/// `<url|text>` link to the candidate's profile.
fn success_message(identity: &Identity, invitation: &InvitationRecord) -> String {
	let candidate = format!("<{}|{}>", identity.profile_url, identity.handle);
	match invitation.status {
		InvitationStatus::NewlyInvited => format!(
			"Success! Candidate {candidate} was invited to {}. They have received an email with the link: {}.",
			invitation.repository_full_name, invitation.invitation_url
		),
		InvitationStatus::AlreadyMemberOrCollaborator => format!(
			"Success! Candidate {candidate} was added to {} without an invitation: {}. {EXISTING_MEMBER_WARNING}",
			invitation.repository_full_name, invitation.invitation_url
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn identity() -> Identity {
		Identity {
			handle: CandidateHandle::parse("octocat").unwrap(),
			profile_url: "https://github.com/octocat".to_string(),
		}
	}

	fn repository() -> RepositoryRecord {
		RepositoryRecord::new("acme-challenges/octocat-challenge".to_string(), None)
	}

	#[test]
	fn repository_url_falls_back_to_github_web() {
		assert_eq!(
			repository().html_url,
			"https://github.com/acme-challenges/octocat-challenge"
		);
	}

	#[test]
	fn invitation_url_prefers_api_value() {
		let record = InvitationRecord::invited(
			&identity(),
			&repository(),
			Some("https://github.com/acme-challenges/octocat-challenge/invitations/9".to_string()),
		);
		assert!(record.invitation_url.ends_with("/invitations/9"));
	}

	#[test]
	fn invitation_url_is_derived_when_missing() {
		let record = InvitationRecord::invited(&identity(), &repository(), None);
		assert_eq!(
			record.invitation_url,
			"https://github.com/acme-challenges/octocat-challenge/invitations"
		);
	}

	#[test]
	fn new_invitation_message() {
		let invitation = InvitationRecord::invited(&identity(), &repository(), None);
		let success = ProvisionSuccess::new(identity(), repository(), invitation);

		assert_eq!(
			success.message,
			"Success! Candidate <https://github.com/octocat|octocat> was invited to \
			 acme-challenges/octocat-challenge. They have received an email with the link: \
			 https://github.com/acme-challenges/octocat-challenge/invitations."
		);
		assert!(!success.has_warning());
	}

	#[test]
	fn existing_member_message_warns() {
		let invitation = InvitationRecord::already_member(&identity(), &repository());
		let success = ProvisionSuccess::new(identity(), repository(), invitation);

		assert!(success.has_warning());
		assert!(success.message.starts_with("Success!"));
		assert!(success.message.contains("octocat"));
		assert!(success.message.ends_with(EXISTING_MEMBER_WARNING));
	}

	#[test]
	fn failure_from_error() {
		let err = ProvisionError::UserNotFound {
			handle: "ghost".to_string(),
			status: 404,
		};
		let outcome = ProvisionOutcome::Failure(ProvisionFailure::from(&err));

		assert!(!outcome.is_success());
		assert_eq!(outcome.message(), "Could not find user");
		let failure = outcome.failure().unwrap();
		assert_eq!(failure.stage, Stage::Verification);
		assert_eq!(failure.kind, FailureKind::UserNotFound);
	}
}
