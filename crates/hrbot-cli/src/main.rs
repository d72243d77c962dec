// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

mod output;

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hrbot_common_secret::{require_secret_env, SecretString};
use hrbot_provision::config::{
	BASE_URL_VAR, CLEANUP_VAR, ORG_VAR, SUFFIX_VAR, TEMPLATE_VAR, TOKEN_VAR,
};
use hrbot_provision::{Provisioner, ProvisionerConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use output::OutputFormat;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

/// Provision code-challenge repositories for candidates.
#[derive(Parser, Debug)]
#[command(name = "hrbot", version, about)]
struct Cli {
	/// Organization that owns the template and the new repositories
	#[arg(long, env = "CHALLENGE_ORG", global = true)]
	org: Option<String>,

	/// Template repository inside the organization
	#[arg(long, env = "TEMPLATE_REPO", global = true)]
	template: Option<String>,

	/// Suffix appended to the candidate handle to name the repository
	#[arg(long, env = "NEW_REPO_SUFFIX", global = true)]
	suffix: Option<String>,

	/// GitHub API base URL
	#[arg(long, env = "GITHUB_API_URL", global = true)]
	api_url: Option<String>,

	/// Delete the new repository again if the invitation fails
	/// [default: $HRBOT_CLEANUP_ON_INVITE_FAILURE, else false]
	#[arg(long, global = true)]
	cleanup_on_invite_failure: bool,

	/// How the outcome is printed on stdout
	#[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
	output: OutputFormat,

	/// Log format on stderr
	#[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Verify a candidate, create their repository and invite them to it
	Invite {
		/// GitHub username, with or without a leading '@'
		handle: String,
	},
}

fn init_tracing(format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hrbot=info"));

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

impl Cli {
	/// Value given on the command line (or through clap's env fallback).
	fn flag_value(&self, key: &str) -> Option<String> {
		match key {
			ORG_VAR => self.org.clone(),
			TEMPLATE_VAR => self.template.clone(),
			SUFFIX_VAR => self.suffix.clone(),
			BASE_URL_VAR => self.api_url.clone(),
			CLEANUP_VAR if self.cleanup_on_invite_failure => Some("true".to_string()),
			_ => None,
		}
	}
}

/// Layer the command line over `lookup` and load the config the same way
/// `ProvisionerConfig::from_env` does.
fn build_config<F>(cli: &Cli, lookup: F, token: SecretString) -> Result<ProvisionerConfig>
where
	F: Fn(&str) -> Option<String>,
{
	let config =
		ProvisionerConfig::from_source(|key| cli.flag_value(key).or_else(|| lookup(key)), token)?;
	Ok(config)
}

fn load_provisioner(cli: &Cli) -> Result<Provisioner> {
	let token = require_secret_env(TOKEN_VAR)?;
	let config = build_config(cli, |key| env::var(key).ok(), token)?;
	Ok(Provisioner::new(config)?)
}

#[tokio::main]
async fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.log_format);

	let provisioner = match load_provisioner(&cli) {
		Ok(provisioner) => provisioner,
		Err(e) => {
			error!(error = %e, "invalid configuration");
			eprintln!("error: {e:#}");
			return ExitCode::from(2);
		}
	};

	let Command::Invite { handle } = &cli.command;
	info!(
		org = %provisioner.config().organization(),
		template = %provisioner.config().template_repo(),
		"provisioning candidate"
	);
	let outcome = provisioner.provision(handle).await;

	match output::render(&outcome, cli.output) {
		Ok(rendered) => println!("{rendered}"),
		Err(e) => {
			eprintln!("error: failed to render outcome: {e}");
			return ExitCode::FAILURE;
		}
	}

	if outcome.is_success() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}
