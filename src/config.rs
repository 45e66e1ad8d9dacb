use std::env;

use anyhow::{Context, Result};
use url::Url;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const DEFAULT_USER_AGENT: &str = "avatar-lookup";

/// Settings for the HTTP client and the lookup stages.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root the `/users/{username}` path is appended to.
    pub api_base: Url,
    /// Bearer token sent with every request, raises the API rate limit.
    pub token: Option<String>,
    /// GitHub rejects requests without a `User-Agent`.
    pub user_agent: String,
    /// Requested avatar edge length in pixels, appended as `s=<size>`.
    pub avatar_size: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            avatar_size: None,
        }
    }
}

impl ClientConfig {
    /// Reads `GITHUB_TOKEN`, `GITHUB_API_URL` and `AVATAR_LOOKUP_SIZE` on top of the defaults.
    /// Unset or empty variables keep the default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.token = var("GITHUB_TOKEN");

        if let Some(base) = var("GITHUB_API_URL") {
            config.api_base =
                Url::parse(&base).with_context(|| format!("Invalid GITHUB_API_URL: {base}"))?;
        }

        if let Some(size) = var("AVATAR_LOOKUP_SIZE") {
            let size = size
                .parse::<u32>()
                .with_context(|| format!("Invalid AVATAR_LOOKUP_SIZE: {size}"))?;
            config.avatar_size = Some(size);
        }

        Ok(config)
    }
}
