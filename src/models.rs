use serde::Deserialize;
use url::Url;

use crate::outcome::Outcome;

/// A GitHub user as returned by the `/users/{username}` API, reduced to what the
/// avatar lookup needs. Only built by decoding a lookup response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "login")]
    display_name: String,
    #[serde(rename = "avatar_url")]
    avatar_location: Url,
}

impl UserRecord {
    /// Decodes a lookup response body. Both `login` and `avatar_url` are required and
    /// `avatar_url` must be an absolute URL; other fields are ignored.
    pub fn from_json(body: &[u8]) -> Outcome<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar_location(&self) -> &Url {
        &self.avatar_location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_login_and_avatar_url() {
        let body = br#"{
            "login": "octocat",
            "id": 583231,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "name": "The Octocat"
        }"#;
        let user = UserRecord::from_json(body).unwrap();
        assert_eq!(user.display_name(), "octocat");
        assert_eq!(
            user.avatar_location().as_str(),
            "https://avatars.githubusercontent.com/u/583231?v=4"
        );
    }

    #[test]
    fn missing_fields_fail() {
        assert!(UserRecord::from_json(br#"{"login":"octocat"}"#).is_err());
        assert!(UserRecord::from_json(br#"{"avatar_url":"https://example.com/a.png"}"#).is_err());
    }

    #[test]
    fn mistyped_or_malformed_fails() {
        assert!(UserRecord::from_json(br#"{"login":42,"avatar_url":"https://example.com/a.png"}"#).is_err());
        assert!(UserRecord::from_json(br#"{"login":"octocat","avatar_url":"/relative.png"}"#).is_err());
        assert!(UserRecord::from_json(b"<html>rate limited</html>").is_err());
        assert!(UserRecord::from_json(b"").is_err());
    }
}
