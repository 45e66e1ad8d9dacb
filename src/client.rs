use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::fetcher::Fetcher;
use crate::outcome::{Failure, Outcome};

/// Creates a preconfigured HTTP client with the headers the GitHub API expects.
pub fn build_client(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github.v3+json"),
    );

    if let Some(token) = &config.token {
        let mut auth =
            HeaderValue::from_str(&format!("Bearer {token}")).context("Invalid token value")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
    }

    Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

/// [`Fetcher`] backed by a shared `reqwest` client. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::from_client(build_client(config)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Outcome<Vec<u8>> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        // Only a plain 200 counts, even other 2xx codes are rejected.
        let status = response.status();
        if status != StatusCode::OK {
            debug!(%url, %status, "rejected response");
            return Err(Failure::status(status));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
