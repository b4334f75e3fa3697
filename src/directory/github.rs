use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{header, StatusCode};
use url::Url;

use super::{FetchError, RepositoryDirectory, PAGE_SIZE};
use crate::types::Repository;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API listing of a user's repositories.
#[derive(Clone, Debug)]
pub struct GitHubDirectory {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    token: Option<String>,
}

impl GitHubDirectory {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.github.com";

    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            bail!("GitHub API URL {} cannot be used as a base", base_url);
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url,
            timeout,
            token: None,
        })
    }

    /// Token sent as a bearer credential on the outbound listing call.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn repos_url(&self, owner: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::Transport(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["users", owner, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("sort", "updated");
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Transport(format!(
                "request timed out after {}ms",
                self.timeout.as_millis()
            ))
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl RepositoryDirectory for GitHubDirectory {
    async fn fetch(&self, owner: &str) -> Result<Vec<Repository>, FetchError> {
        let url = self.repos_url(owner)?;
        log::debug!("fetching repositories from {}", url);

        let mut request = self.client.get(url).header(header::ACCEPT, ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::OwnerNotFound(owner.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.transport_error(e))?;
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        let repos: Vec<Repository> =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        log::debug!("directory returned {} repositories for {}", repos.len(), owner);
        Ok(repos)
    }
}
