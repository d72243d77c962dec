// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Request and response shapes for the GitHub endpoints the bot calls.
//!
//! Only the fields the bot reads are modelled; GitHub sends many more and
//! serde ignores them.

use serde::{Deserialize, Serialize};

/// The `type` field of a GitHub account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
	User,
	Organization,
	Bot,
	/// Unknown or absent `type`; never treated as a user.
	#[default]
	#[serde(other)]
	Other,
}

/// Public profile from `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
	pub id: u64,
	pub login: String,
	#[serde(rename = "type", default)]
	pub account_type: AccountType,
	/// Profile page, e.g. `https://github.com/octocat`.
	pub html_url: String,
}

impl GitHubUser {
	pub fn is_user(&self) -> bool {
		self.account_type == AccountType::User
	}
}

/// Body of `POST /repos/{owner}/{template}/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRepositoryRequest {
	pub owner: String,
	pub name: String,
	pub private: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// The repository GitHub created from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRepository {
	pub id: u64,
	pub name: String,
	/// `owner/name` as assigned by GitHub.
	pub full_name: String,
	pub html_url: Option<String>,
	#[serde(default)]
	pub private: bool,
}

/// Repository permission granted to a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorPermission {
	Pull,
	Triage,
	Push,
	Maintain,
	Admin,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AddCollaboratorRequest {
	pub permission: CollaboratorPermission,
}

/// Pending invitation returned with `201 Created` by the collaborators endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInvitation {
	pub id: u64,
	pub html_url: Option<String>,
	pub permissions: Option<String>,
}

/// What `PUT /repos/{owner}/{repo}/collaborators/{username}` did.
#[derive(Debug, Clone)]
pub enum CollaboratorOutcome {
	/// `201`: a new invitation is pending for the user.
	Invited(RepositoryInvitation),
	/// `204`: the user was already a collaborator or an organization member
	/// and got access without an invitation.
	AlreadyCollaborator,
}
