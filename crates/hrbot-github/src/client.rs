// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP implementation of [`GitHubApi`].

use async_trait::async_trait;
use hrbot_common_secret::SecretString;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::error::GitHubError;
use crate::types::{
	AddCollaboratorRequest, CollaboratorOutcome, CollaboratorPermission, GenerateRepositoryRequest,
	GeneratedRepository, GitHubUser, RepositoryInvitation,
};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// The GitHub operations the provisioning flow needs.
///
/// Each method succeeds only on the status its endpoint documents for
/// success; any other status comes back as [`GitHubError::Api`].
#[async_trait]
pub trait GitHubApi: Send + Sync {
	/// `GET /users/{username}`, expecting `200`.
	async fn get_user(&self, username: &str) -> Result<GitHubUser, GitHubError>;

	/// `POST /repos/{owner}/{template}/generate`, expecting `201`.
	async fn generate_repository(
		&self,
		template_owner: &str,
		template_repo: &str,
		request: &GenerateRepositoryRequest,
	) -> Result<GeneratedRepository, GitHubError>;

	/// `PUT /repos/{full_name}/collaborators/{username}`, expecting `201` or `204`.
	async fn add_collaborator(
		&self,
		full_name: &str,
		username: &str,
		permission: CollaboratorPermission,
	) -> Result<CollaboratorOutcome, GitHubError>;

	/// `DELETE /repos/{full_name}`, expecting `204`.
	async fn delete_repository(&self, full_name: &str) -> Result<(), GitHubError>;
}

/// Validate a GitHub API base URL.
///
/// HTTPS is required, except for loopback hosts which may use plain HTTP
/// (local proxies and mock servers). A trailing slash is dropped.
pub fn parse_base_url(raw: &str) -> Result<Url, GitHubError> {
	let url = Url::parse(raw)
		.map_err(|e| GitHubError::Config(format!("Invalid GitHub base URL '{raw}': {e}")))?;

	let host = url
		.host_str()
		.ok_or_else(|| GitHubError::Config("GitHub base URL must include a host".to_string()))?;
	let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");

	match url.scheme() {
		"https" => {}
		"http" if loopback => {}
		other => {
			return Err(GitHubError::Config(format!(
				"GitHub base URL must use https, got '{other}'"
			)))
		}
	}

	let trimmed = url.as_str().trim_end_matches('/').to_string();
	Url::parse(&trimmed)
		.map_err(|e| GitHubError::Config(format!("Invalid GitHub base URL '{raw}': {e}")))
}

/// Percent-encode each segment of an `owner/name` path.
fn repo_path(full_name: &str) -> String {
	full_name
		.split('/')
		.map(|segment| encode(segment).into_owned())
		.collect::<Vec<_>>()
		.join("/")
}

/// GitHub REST client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
	base_url: String,
	token: SecretString,
	http: reqwest::Client,
}

impl GitHubClient {
	#[instrument(skip_all, name = "GitHubClient::new", fields(base_url = %base_url))]
	pub fn new(base_url: Url, token: SecretString) -> Result<Self, GitHubError> {
		let http = hrbot_common_http::new_client()?;
		Ok(Self {
			base_url: base_url.as_str().trim_end_matches('/').to_string(),
			token,
			http,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn request(&self, method: Method, path: &str) -> RequestBuilder {
		self
			.http
			.request(method, format!("{}{path}", self.base_url))
			.header(ACCEPT, GITHUB_ACCEPT)
			.header(AUTHORIZATION, format!("Bearer {}", self.token.expose()))
			.header("X-GitHub-Api-Version", GITHUB_API_VERSION)
	}

	async fn api_error(response: Response) -> GitHubError {
		let status = response.status().as_u16();
		let body = response.text().await.unwrap_or_default();
		GitHubError::api(status, body)
	}

	async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, GitHubError> {
		response
			.json()
			.await
			.map_err(|e| GitHubError::InvalidResponse(format!("failed to parse {what} response: {e}")))
	}
}

#[async_trait]
impl GitHubApi for GitHubClient {
	#[instrument(skip(self), name = "GitHubClient::get_user")]
	async fn get_user(&self, username: &str) -> Result<GitHubUser, GitHubError> {
		let response = self
			.request(Method::GET, &format!("/users/{}", encode(username)))
			.send()
			.await?;
		debug!(status = %response.status(), "user lookup answered");

		if response.status() != StatusCode::OK {
			return Err(Self::api_error(response).await);
		}
		Self::decode(response, "user").await
	}

	#[instrument(skip(self, request), name = "GitHubClient::generate_repository", fields(owner = %request.owner, name = %request.name))]
	async fn generate_repository(
		&self,
		template_owner: &str,
		template_repo: &str,
		request: &GenerateRepositoryRequest,
	) -> Result<GeneratedRepository, GitHubError> {
		let path = format!(
			"/repos/{}/{}/generate",
			encode(template_owner),
			encode(template_repo)
		);
		let response = self.request(Method::POST, &path).json(request).send().await?;
		debug!(status = %response.status(), "generate answered");

		if response.status() != StatusCode::CREATED {
			return Err(Self::api_error(response).await);
		}
		Self::decode(response, "repository").await
	}

	#[instrument(skip(self), name = "GitHubClient::add_collaborator")]
	async fn add_collaborator(
		&self,
		full_name: &str,
		username: &str,
		permission: CollaboratorPermission,
	) -> Result<CollaboratorOutcome, GitHubError> {
		let path = format!(
			"/repos/{}/collaborators/{}",
			repo_path(full_name),
			encode(username)
		);
		let response = self
			.request(Method::PUT, &path)
			.json(&AddCollaboratorRequest { permission })
			.send()
			.await?;
		debug!(status = %response.status(), "add collaborator answered");

		match response.status() {
			StatusCode::CREATED => {
				let invitation: RepositoryInvitation = Self::decode(response, "invitation").await?;
				Ok(CollaboratorOutcome::Invited(invitation))
			}
			StatusCode::NO_CONTENT => Ok(CollaboratorOutcome::AlreadyCollaborator),
			_ => Err(Self::api_error(response).await),
		}
	}

	#[instrument(skip(self), name = "GitHubClient::delete_repository")]
	async fn delete_repository(&self, full_name: &str) -> Result<(), GitHubError> {
		let response = self
			.request(Method::DELETE, &format!("/repos/{}", repo_path(full_name)))
			.send()
			.await?;
		debug!(status = %response.status(), "delete answered");

		if response.status() != StatusCode::NO_CONTENT {
			return Err(Self::api_error(response).await);
		}
		Ok(())
	}
}
