// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Typed GitHub REST client for hrbot.
//!
//! Covers exactly the calls the candidate provisioning flow makes:
//!
//! - `GET /users/{username}`
//! - `POST /repos/{owner}/{template}/generate`
//! - `PUT /repos/{owner}/{repo}/collaborators/{username}`
//! - `DELETE /repos/{owner}/{repo}` (optional cleanup)
//!
//! The [`GitHubApi`] trait is the seam the provisioner depends on;
//! [`GitHubClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod types;

pub use client::{parse_base_url, GitHubApi, GitHubClient, DEFAULT_BASE_URL};
pub use error::GitHubError;
pub use types::{
	AccountType, CollaboratorOutcome, CollaboratorPermission, GenerateRepositoryRequest,
	GeneratedRepository, GitHubUser, RepositoryInvitation,
};
