// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the provisioner.

use std::env;

use hrbot_common_secret::{require_secret_env, RequiredSecretError, SecretString};
use hrbot_github::{parse_base_url, DEFAULT_BASE_URL};
use reqwest::Url;
use thiserror::Error;

pub const ORG_VAR: &str = "CHALLENGE_ORG";
pub const TEMPLATE_VAR: &str = "TEMPLATE_REPO";
pub const SUFFIX_VAR: &str = "NEW_REPO_SUFFIX";
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const BASE_URL_VAR: &str = "GITHUB_API_URL";
pub const CLEANUP_VAR: &str = "HRBOT_CLEANUP_ON_INVITE_FAILURE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error(transparent)]
	Secret(#[from] RequiredSecretError),
}

/// Everything a provisioning run needs besides the candidate handle.
///
/// The credential is a [`SecretString`] and never shows up in `Debug`.
#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
	/// Organization that owns the template and receives the new repository.
	organization: String,

	/// Template repository name inside `organization`.
	template_repo: String,

	/// Appended to the candidate handle to name the new repository.
	repo_name_suffix: String,

	/// GitHub token with `repo` and `admin:org` scope.
	credential: SecretString,

	/// GitHub API base URL.
	base_url: Url,

	/// Delete the generated repository when the invitation fails.
	cleanup_on_invite_failure: bool,
}

impl ProvisionerConfig {
	/// Create a configuration against `https://api.github.com` with cleanup disabled.
	pub fn new(
		organization: impl Into<String>,
		template_repo: impl Into<String>,
		repo_name_suffix: impl Into<String>,
		credential: SecretString,
	) -> Self {
		Self {
			organization: organization.into(),
			template_repo: template_repo.into(),
			repo_name_suffix: repo_name_suffix.into(),
			credential,
			base_url: default_base_url(),
			cleanup_on_invite_failure: false,
		}
	}

	/// Load configuration from the environment.
	///
	/// Required:
	/// - `CHALLENGE_ORG`
	/// - `TEMPLATE_REPO`
	/// - `GITHUB_TOKEN` (or `GITHUB_TOKEN_FILE`)
	///
	/// Optional:
	/// - `NEW_REPO_SUFFIX` (defaults to empty)
	/// - `GITHUB_API_URL` (defaults to api.github.com, must be HTTPS)
	/// - `HRBOT_CLEANUP_ON_INVITE_FAILURE` (`true`/`false`, defaults to `false`)
	pub fn from_env() -> Result<Self, ConfigError> {
		let credential = require_secret_env(TOKEN_VAR)?;
		Self::from_source(|key| env::var(key).ok(), credential)
	}

	/// Build from an arbitrary variable source; `from_env` passes `std::env`.
	pub fn from_source<F>(lookup: F, credential: SecretString) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required =
			|key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

		let mut config = Self::new(
			required(ORG_VAR)?,
			required(TEMPLATE_VAR)?,
			lookup(SUFFIX_VAR).unwrap_or_default(),
			credential,
		);

		if let Some(raw) = lookup(BASE_URL_VAR) {
			config = config.with_base_url(&raw)?;
		}
		if let Some(raw) = lookup(CLEANUP_VAR) {
			config = config.with_cleanup_on_invite_failure(parse_flag(CLEANUP_VAR, &raw)?);
		}

		config.validate()?;
		Ok(config)
	}

	/// Point the client at another API host (GitHub Enterprise, a proxy, a mock).
	pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
		self.base_url = parse_base_url(raw).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
		Ok(self)
	}

	pub fn with_cleanup_on_invite_failure(mut self, enabled: bool) -> Self {
		self.cleanup_on_invite_failure = enabled;
		self
	}

	/// Reject blank organization, template or credential.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.organization.trim().is_empty() {
			return Err(ConfigError::InvalidConfig(
				"organization cannot be empty".to_string(),
			));
		}
		if self.template_repo.trim().is_empty() {
			return Err(ConfigError::InvalidConfig(
				"template repository cannot be empty".to_string(),
			));
		}
		if self.credential.is_blank() {
			return Err(ConfigError::InvalidConfig(
				"GitHub token cannot be empty".to_string(),
			));
		}
		Ok(())
	}

	pub fn organization(&self) -> &str {
		&self.organization
	}

	pub fn template_repo(&self) -> &str {
		&self.template_repo
	}

	pub fn repo_name_suffix(&self) -> &str {
		&self.repo_name_suffix
	}

	pub(crate) fn credential(&self) -> &SecretString {
		&self.credential
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn cleanup_on_invite_failure(&self) -> bool {
		self.cleanup_on_invite_failure
	}

	/// Name of the repository generated for `handle`.
	pub fn repository_name(&self, handle: &str) -> String {
		format!("{handle}{}", self.repo_name_suffix)
	}

	/// `org/name` the repository is requested under. GitHub's answer is
	/// authoritative; this is only for messages before it exists.
	pub fn requested_full_name(&self, handle: &str) -> String {
		format!("{}/{}", self.organization, self.repository_name(handle))
	}
}

fn default_base_url() -> Url {
	Url::parse(DEFAULT_BASE_URL).expect("default URL is valid")
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"" | "0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ConfigError::InvalidConfig(format!(
			"{key} must be true or false, got '{raw}'"
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn token() -> SecretString {
		SecretString::new("ghp_config_test".to_string())
	}

	fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| vars.get(key).cloned()
	}

	#[test]
	fn new_uses_github_defaults() {
		let config = ProvisionerConfig::new("acme-challenges", "challenge-template", "-challenge", token());

		assert_eq!(config.organization(), "acme-challenges");
		assert_eq!(config.base_url().as_str(), "https://api.github.com/");
		assert!(!config.cleanup_on_invite_failure());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn repository_naming() {
		let config = ProvisionerConfig::new("acme-challenges", "challenge-template", "-challenge", token());

		assert_eq!(config.repository_name("octocat"), "octocat-challenge");
		assert_eq!(
			config.requested_full_name("octocat"),
			"acme-challenges/octocat-challenge"
		);
	}

	#[test]
	fn from_source_reads_all_variables() {
		let config = ProvisionerConfig::from_source(
			source(&[
				(ORG_VAR, "acme-challenges"),
				(TEMPLATE_VAR, "challenge-template"),
				(SUFFIX_VAR, "-challenge"),
				(BASE_URL_VAR, "https://github.example.com/api/v3"),
				(CLEANUP_VAR, "true"),
			]),
			token(),
		)
		.unwrap();

		assert_eq!(config.template_repo(), "challenge-template");
		assert_eq!(config.repo_name_suffix(), "-challenge");
		assert_eq!(
			config.base_url().as_str(),
			"https://github.example.com/api/v3"
		);
		assert!(config.cleanup_on_invite_failure());
	}

	#[test]
	fn suffix_is_optional() {
		let config = ProvisionerConfig::from_source(
			source(&[(ORG_VAR, "acme"), (TEMPLATE_VAR, "tpl")]),
			token(),
		)
		.unwrap();
		assert_eq!(config.repository_name("octocat"), "octocat");
	}

	#[test]
	fn missing_org_is_reported_by_name() {
		let err = ProvisionerConfig::from_source(source(&[(TEMPLATE_VAR, "tpl")]), token()).unwrap_err();
		assert_eq!(err.to_string(), "missing environment variable: CHALLENGE_ORG");
	}

	#[test]
	fn insecure_base_url_is_rejected() {
		let err = ProvisionerConfig::from_source(
			source(&[
				(ORG_VAR, "acme"),
				(TEMPLATE_VAR, "tpl"),
				(BASE_URL_VAR, "http://api.github.com"),
			]),
			token(),
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidConfig(_)));
	}

	#[test]
	fn bad_cleanup_flag_is_rejected() {
		let err = ProvisionerConfig::from_source(
			source(&[(ORG_VAR, "acme"), (TEMPLATE_VAR, "tpl"), (CLEANUP_VAR, "maybe")]),
			token(),
		)
		.unwrap_err();
		assert!(err.to_string().contains(CLEANUP_VAR));
	}

	#[test]
	fn validation_rejects_blank_fields() {
		assert!(ProvisionerConfig::new("", "tpl", "", token()).validate().is_err());
		assert!(ProvisionerConfig::new("acme", " ", "", token()).validate().is_err());
		assert!(
			ProvisionerConfig::new("acme", "tpl", "", SecretString::new(String::new()))
				.validate()
				.is_err()
		);
	}

	#[test]
	fn debug_redacts_credential() {
		let config = ProvisionerConfig::new("acme", "tpl", "", token());
		let debug = format!("{config:?}");

		assert!(!debug.contains("ghp_config_test"));
		assert!(debug.contains("[REDACTED]"));
	}
}
