// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Rendering of a provisioning outcome for the workflow step.

use hrbot_provision::{FailureKind, ProvisionOutcome, Stage};
use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
	/// The operator-facing message only.
	#[default]
	Text,
	/// `{"responseMessage": ...}` or `{"error": ..., "stage": ..., "kind": ...}`.
	Json,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StepOutput<'a> {
	Success {
		#[serde(rename = "responseMessage")]
		response_message: &'a str,
	},
	Failure {
		error: &'a str,
		stage: Stage,
		kind: FailureKind,
	},
}

impl<'a> From<&'a ProvisionOutcome> for StepOutput<'a> {
	fn from(outcome: &'a ProvisionOutcome) -> Self {
		match outcome {
			ProvisionOutcome::Success(success) => StepOutput::Success {
				response_message: &success.message,
			},
			ProvisionOutcome::Failure(failure) => StepOutput::Failure {
				error: &failure.message,
				stage: failure.stage,
				kind: failure.kind,
			},
		}
	}
}

pub fn render(outcome: &ProvisionOutcome, format: OutputFormat) -> serde_json::Result<String> {
	match format {
		OutputFormat::Text => Ok(outcome.message().to_string()),
		OutputFormat::Json => serde_json::to_string(&StepOutput::from(outcome)),
	}
}
