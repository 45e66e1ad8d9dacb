use reqwest::StatusCode;
use thiserror::Error;

/// Result of every stage in the lookup: a value, or an undifferentiated [`Failure`].
pub type Outcome<T> = Result<T, Failure>;

/// Why a stage failed. Only ever rendered for logs, callers cannot inspect it.
#[derive(Debug, Error)]
pub(crate) enum Reason {
    #[error("username {0:?} does not form a valid lookup URL")]
    InvalidUsername(String),
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("malformed user record: {0}")]
    Decode(serde_json::Error),
    #[error("undecodable avatar image: {0}")]
    Image(image::ImageError),
    #[error("{0}")]
    Other(String),
}

/// A lookup stage failed.
///
/// The underlying cause is only rendered into the `Display` message; `source()` is always
/// `None`, so there is no way to branch on it: a malformed username, a 404, a dropped
/// connection and a corrupt image all look the same to the caller. Any two failures compare equal.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Failure(Reason);

impl Failure {
    /// Failure with a free-form reason, for [`Fetcher`](crate::Fetcher) implementations
    /// outside this crate.
    pub fn other(reason: impl Into<String>) -> Self {
        Self(Reason::Other(reason.into()))
    }

    pub(crate) fn invalid_username(username: &str) -> Self {
        Self(Reason::InvalidUsername(username.to_owned()))
    }

    pub(crate) fn status(status: StatusCode) -> Self {
        Self(Reason::Status(status))
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Self(Reason::Transport(err))
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self(Reason::Decode(err))
    }
}

impl From<image::ImageError> for Failure {
    fn from(err: image::ImageError) -> Self {
        Self(Reason::Image(err))
    }
}

impl PartialEq for Failure {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Failure {}
