// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Candidate code-challenge provisioning.
//!
//! Given a candidate's GitHub username, the [`Provisioner`] runs three stages
//! against the GitHub REST API, strictly in order:
//!
//! 1. **Verification**: the username exists and is a personal (`User`) account.
//! 2. **Creation**: a private repository `{org}/{username}{suffix}` is generated
//!    from the challenge template.
//! 3. **Invitation**: the candidate is invited to that repository with
//!    `maintain` permission.
//!
//! The first failing stage ends the run. [`Provisioner::provision`] never
//! returns an error; every failure is folded into a
//! [`ProvisionOutcome::Failure`] carrying an operator-facing message and the
//! stage it happened in.
//!
//! # Example
//!
//! ```rust,no_run
//! use hrbot_provision::{Provisioner, ProvisionerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProvisionerConfig::from_env()?;
//! let provisioner = Provisioner::new(config)?;
//!
//! let outcome = provisioner.provision("@octocat").await;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod outcome;
pub mod provisioner;
mod stages;

pub use config::{ConfigError, ProvisionerConfig};
pub use error::{Cleanup, FailureKind, ProvisionError, Stage};
pub use handle::CandidateHandle;
pub use outcome::{
	Identity, InvitationRecord, InvitationStatus, ProvisionFailure, ProvisionOutcome,
	ProvisionSuccess, RepositoryRecord,
};
pub use provisioner::Provisioner;
