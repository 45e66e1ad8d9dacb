use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::outcome::Outcome;

/// The network boundary: one GET, raw body bytes or failure.
///
/// Implementations issue exactly one request per call, with no caching or retries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Outcome<Vec<u8>>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, url: &Url) -> Outcome<Vec<u8>> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for &F {
    async fn fetch(&self, url: &Url) -> Outcome<Vec<u8>> {
        (**self).fetch(url).await
    }
}
