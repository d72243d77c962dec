// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The three pipeline stages. Each takes the previous stage's output and
//! classifies GitHub's answer into a value or a [`ProvisionError`].

use hrbot_github::{
	CollaboratorOutcome, CollaboratorPermission, GenerateRepositoryRequest, GitHubApi, GitHubError,
};
use tracing::{info, instrument, warn};

use crate::config::ProvisionerConfig;
use crate::error::{Cleanup, ProvisionError, Stage};
use crate::handle::CandidateHandle;
use crate::outcome::{Identity, InvitationRecord, RepositoryRecord};

/// Permission every candidate gets on their challenge repository.
pub(crate) const CANDIDATE_PERMISSION: CollaboratorPermission = CollaboratorPermission::Maintain;

#[instrument(skip_all, fields(handle = %handle))]
pub(crate) async fn verify_identity(
	api: &dyn GitHubApi,
	handle: CandidateHandle,
) -> Result<Identity, ProvisionError> {
	let user = match api.get_user(handle.as_str()).await {
		Ok(user) => user,
		Err(GitHubError::Api { status, message }) => {
			warn!(status, body = %message, "user lookup failed");
			return Err(ProvisionError::UserNotFound {
				handle: handle.to_string(),
				status,
			});
		}
		Err(e) => return Err(ProvisionError::unexpected(Stage::Verification, e)),
	};

	if !user.is_user() {
		warn!(account_type = ?user.account_type, "handle is not a personal account");
		return Err(ProvisionError::NotAUserAccount {
			handle: handle.to_string(),
			account_type: user.account_type,
		});
	}

	info!(profile = %user.html_url, "candidate verified");
	Ok(Identity {
		handle,
		profile_url: user.html_url,
	})
}

#[instrument(skip_all, fields(handle = %identity.handle, org = %config.organization()))]
pub(crate) async fn create_repository(
	api: &dyn GitHubApi,
	config: &ProvisionerConfig,
	identity: &Identity,
) -> Result<RepositoryRecord, ProvisionError> {
	let handle = identity.handle.as_str();
	let request = GenerateRepositoryRequest {
		owner: config.organization().to_string(),
		name: config.repository_name(handle),
		private: true,
		description: None,
	};
	let attempted = config.requested_full_name(handle);

	let repo = match api
		.generate_repository(config.organization(), config.template_repo(), &request)
		.await
	{
		Ok(repo) => repo,
		Err(GitHubError::Api { status: 422, message }) => {
			warn!(repo = %attempted, body = %message, "repository name already taken");
			return Err(ProvisionError::RepositoryAlreadyExists {
				full_name: attempted,
			});
		}
		Err(GitHubError::Api { status, message }) => {
			warn!(repo = %attempted, status, body = %message, "repository generation failed");
			return Err(ProvisionError::RepositoryCreationFailed {
				full_name: attempted,
				status,
			});
		}
		Err(e) => return Err(ProvisionError::unexpected(Stage::Creation, e)),
	};

	// The invitation targets whatever name GitHub assigned, so it must be usable.
	let valid = repo
		.full_name
		.split_once('/')
		.is_some_and(|(owner, name)| !owner.is_empty() && !name.is_empty());
	if !valid {
		return Err(ProvisionError::unexpected(
			Stage::Creation,
			GitHubError::InvalidResponse(format!(
				"repository full_name '{}' is not owner/name",
				repo.full_name
			)),
		));
	}

	info!(repo = %repo.full_name, "repository generated");
	Ok(RepositoryRecord::new(repo.full_name, repo.html_url))
}

#[instrument(skip_all, fields(handle = %identity.handle, repo = %repository.full_name))]
pub(crate) async fn invite_collaborator(
	api: &dyn GitHubApi,
	config: &ProvisionerConfig,
	identity: &Identity,
	repository: &RepositoryRecord,
) -> Result<InvitationRecord, ProvisionError> {
	let outcome = api
		.add_collaborator(
			&repository.full_name,
			identity.handle.as_str(),
			CANDIDATE_PERMISSION,
		)
		.await;

	match outcome {
		Ok(CollaboratorOutcome::Invited(invitation)) => {
			info!(invitation_id = invitation.id, "invitation sent");
			Ok(InvitationRecord::invited(
				identity,
				repository,
				invitation.html_url,
			))
		}
		Ok(CollaboratorOutcome::AlreadyCollaborator) => {
			warn!("candidate already had access; added without invitation");
			Ok(InvitationRecord::already_member(identity, repository))
		}
		Err(GitHubError::Api { status, message }) => {
			warn!(status, body = %message, "invitation failed");
			let cleanup = cleanup_repository(api, config, repository).await;
			Err(ProvisionError::InvitationFailed {
				handle: identity.handle.to_string(),
				full_name: repository.full_name.clone(),
				status,
				cleanup,
			})
		}
		Err(e) => {
			warn!(error = %e, "invitation outcome unknown; repository left in place");
			Err(ProvisionError::unexpected_after_creation(
				e,
				&repository.full_name,
			))
		}
	}
}

/// Delete the repository left behind by a failed invitation, if enabled.
async fn cleanup_repository(
	api: &dyn GitHubApi,
	config: &ProvisionerConfig,
	repository: &RepositoryRecord,
) -> Cleanup {
	if !config.cleanup_on_invite_failure() {
		warn!(repo = %repository.full_name, "repository left in place; cleanup disabled");
		return Cleanup::Skipped;
	}

	match api.delete_repository(&repository.full_name).await {
		Ok(()) => {
			info!(repo = %repository.full_name, "repository deleted after failed invitation");
			Cleanup::Removed
		}
		Err(e) => {
			warn!(repo = %repository.full_name, error = %e, "failed to delete repository");
			Cleanup::Failed
		}
	}
}
