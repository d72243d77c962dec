// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with a consistent User-Agent header.
//!
//! GitHub rejects API requests without a User-Agent, so every client the bot
//! builds goes through [`builder`].

use reqwest::{Client, ClientBuilder};

/// Returns the hrbot User-Agent string, `hrbot/{version}`.
pub fn user_agent() -> String {
	format!("hrbot/{}", env!("CARGO_PKG_VERSION"))
}

/// Client builder preloaded with the hrbot User-Agent.
///
/// No timeout is configured; callers that need one add it themselves.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client from [`builder`].
pub fn new_client() -> reqwest::Result<Client> {
	builder().build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_names_the_bot_and_version() {
		let ua = user_agent();
		let (name, version) = ua.split_once('/').unwrap();
		assert_eq!(name, "hrbot");
		assert_eq!(version, env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn default_client_builds() {
		assert!(new_client().is_ok());
	}
}
