use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::fetcher::Fetcher;
use crate::models::UserRecord;
use crate::outcome::{Failure, Outcome};
use crate::stage::Stage;

/// Resolves a free-text username into a [`UserRecord`] via `GET {api_base}/users/{username}`.
#[derive(Debug, Clone)]
pub struct UserResolver<F> {
    fetcher: F,
    api_base: Url,
}

impl<F: Fetcher> UserResolver<F> {
    pub fn new(fetcher: F, api_base: Url) -> Self {
        Self { fetcher, api_base }
    }

    /// Fails without touching the network when the username cannot be placed into a URL.
    pub async fn resolve_user(&self, username: &str) -> Outcome<UserRecord> {
        let url = lookup_url(&self.api_base, username)
            .ok_or_else(|| Failure::invalid_username(username))?;
        let body = self.fetcher.fetch(&url).await?;
        let user = UserRecord::from_json(&body)?;
        debug!(login = user.display_name(), avatar = %user.avatar_location(), "resolved user");
        Ok(user)
    }
}

#[async_trait]
impl<F: Fetcher> Stage<String> for UserResolver<F> {
    type Out = UserRecord;

    async fn run(&self, username: String) -> Outcome<UserRecord> {
        self.resolve_user(&username).await
    }
}

/// Builds the lookup URL by substituting the raw username into the path. Nothing is
/// percent-encoded; names that would need encoding are rejected instead.
pub(crate) fn lookup_url(api_base: &Url, username: &str) -> Option<Url> {
    if !is_url_safe(username) {
        return None;
    }
    let base = api_base.as_str().trim_end_matches('/');
    let url = Url::parse(&format!("{base}/users/{username}")).ok()?;

    // Dot segments are collapsed while parsing and can climb out of `/users/`.
    let users = format!("{}/users/", api_base.path().trim_end_matches('/'));
    url.path().starts_with(&users).then_some(url)
}

/// Printable ASCII minus the characters URLs never carry raw; `%` only as a complete escape.
fn is_url_safe(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let escape = (chars.next(), chars.next());
                if !matches!(escape, (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()) {
                    return false;
                }
            }
            '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => return false,
            c if c.is_ascii_graphic() => {}
            _ => return false,
        }
    }
    true
}
