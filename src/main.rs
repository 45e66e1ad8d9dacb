use std::env;

use anyhow::Context;
use avatar_lookup::{
    ClientConfig, EventLoop, HttpFetcher, Lookup, LookupPipeline, LookupScreen, ScreenState,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env variables
    dotenvy::dotenv().ok();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let config = ClientConfig::from_env()?;
    let username = env::args().nth(1).unwrap_or_default();

    // Background tokio runtime for the HTTP round trips
    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    // This thread is the home context; completions are delivered here
    let event_loop = EventLoop::new();

    let fetcher = HttpFetcher::new(&config)?;
    let pipeline =
        LookupPipeline::new(fetcher, config.api_base.clone()).with_avatar_size(config.avatar_size);
    let lookup = Lookup::new(pipeline, rt.handle().clone(), event_loop.handle());

    let mut screen = LookupScreen::new(lookup);
    screen.set_username(username);
    screen.tap_download();

    event_loop.run_until(|| !screen.state().is_loading());

    match screen.state() {
        ScreenState::Loaded(avatar) => {
            info!(
                username = screen.username(),
                width = avatar.width(),
                height = avatar.height(),
                "avatar ready"
            );
        }
        state => warn!(username = screen.username(), ?state, "no avatar to show"),
    }

    Ok(())
}
