// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Runs the verification, creation and invitation stages in order.

use hrbot_github::{GitHubApi, GitHubClient};
use tracing::{info, instrument, warn};

use crate::config::{ConfigError, ProvisionerConfig};
use crate::error::ProvisionError;
use crate::handle::CandidateHandle;
use crate::outcome::{ProvisionFailure, ProvisionOutcome, ProvisionSuccess};
use crate::stages;

/// Provisions challenge repositories for candidates.
///
/// Holds no state between runs: two runs for the same handle are independent,
/// and the second one stops at creation because GitHub already has the name.
#[derive(Debug)]
pub struct Provisioner<A = GitHubClient> {
	config: ProvisionerConfig,
	api: A,
}

impl Provisioner<GitHubClient> {
	/// Validate `config` and build an HTTP client from it.
	pub fn new(config: ProvisionerConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let api = GitHubClient::new(config.base_url().clone(), config.credential().clone())
			.map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
		Ok(Self { config, api })
	}
}

impl<A: GitHubApi> Provisioner<A> {
	/// Use a custom [`GitHubApi`] implementation.
	pub fn with_api(config: ProvisionerConfig, api: A) -> Self {
		Self { config, api }
	}

	pub fn config(&self) -> &ProvisionerConfig {
		&self.config
	}

	/// Run all three stages for `raw_handle`.
	///
	/// Never fails: the first stage error becomes
	/// [`ProvisionOutcome::Failure`] and no later stage runs.
	#[instrument(skip(self), fields(org = %self.config.organization()))]
	pub async fn provision(&self, raw_handle: &str) -> ProvisionOutcome {
		match self.run(raw_handle).await {
			Ok(success) => {
				info!(
					repo = %success.repository.full_name,
					warning = success.has_warning(),
					"candidate provisioned"
				);
				ProvisionOutcome::Success(success)
			}
			Err(err) => {
				warn!(
					stage = %err.stage(),
					kind = ?err.kind(),
					status = ?err.status(),
					error = %err,
					"provisioning failed"
				);
				ProvisionOutcome::Failure(ProvisionFailure::from(&err))
			}
		}
	}

	async fn run(&self, raw_handle: &str) -> Result<ProvisionSuccess, ProvisionError> {
		let handle = CandidateHandle::parse(raw_handle)?;
		let identity = stages::verify_identity(&self.api, handle).await?;
		let repository = stages::create_repository(&self.api, &self.config, &identity).await?;
		let invitation =
			stages::invite_collaborator(&self.api, &self.config, &identity, &repository).await?;
		Ok(ProvisionSuccess::new(identity, repository, invitation))
	}
}
