use tracing::{debug, info};
use url::Url;

use crate::avatar::{AvatarLoader, DecodedImage};
use crate::fetcher::Fetcher;
use crate::outcome::Outcome;
use crate::resolver::UserResolver;
use crate::stage::Stage;

/// Username in, avatar out: resolves the user, then downloads and decodes their avatar.
///
/// The avatar request is only issued after the user lookup succeeded. Nothing is shared between
/// runs except the fetcher, so concurrent runs are independent and may finish in any order.
#[derive(Debug, Clone)]
pub struct LookupPipeline<F> {
    fetcher: F,
    api_base: Url,
    avatar_size: Option<u32>,
}

impl<F: Fetcher + Clone> LookupPipeline<F> {
    pub fn new(fetcher: F, api_base: Url) -> Self {
        Self {
            fetcher,
            api_base,
            avatar_size: None,
        }
    }

    pub fn with_avatar_size(mut self, size: Option<u32>) -> Self {
        self.avatar_size = size;
        self
    }

    /// Runs one lookup. A failure at any stage ends the run; the display name is not reported
    /// on its own when only the avatar fails.
    pub async fn run(&self, username: &str) -> Outcome<DecodedImage> {
        let stages = UserResolver::new(self.fetcher.clone(), self.api_base.clone())
            .then(AvatarLoader::new(self.fetcher.clone()).with_size(self.avatar_size));

        let outcome = stages.run(username.to_owned()).await;
        match &outcome {
            Ok(image) => info!(
                username,
                width = image.width(),
                height = image.height(),
                "avatar lookup finished"
            ),
            Err(failure) => debug!(username, reason = %failure, "avatar lookup failed"),
        }
        outcome
    }
}
