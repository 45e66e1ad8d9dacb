//! Looks up a GitHub user by username and downloads their avatar.
//!
//! The flow is `username → GET /users/{username} → avatar_url → GET avatar → decode`. Every
//! stage yields an [`Outcome`]; the first failure ends the lookup and the caller only learns
//! that it failed, not why.
//!
//! [`LookupPipeline`] is the async core. [`Lookup`] wraps it for callback-style callers and
//! delivers completions on a [`HomeContext`], the thread that owns presentation state.

pub mod avatar;
pub mod client;
pub mod config;
pub mod fetcher;
pub mod home;
pub mod lookup;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod resolver;
pub mod screen;
pub mod stage;

pub use avatar::{AvatarLoader, DecodedImage};
pub use client::HttpFetcher;
pub use config::ClientConfig;
pub use fetcher::Fetcher;
pub use home::{EventLoop, EventLoopHandle, HomeContext};
pub use lookup::Lookup;
pub use models::UserRecord;
pub use outcome::{Failure, Outcome};
pub use pipeline::LookupPipeline;
pub use resolver::UserResolver;
pub use screen::{Liveness, LookupScreen, ScreenState};
pub use stage::{Stage, Then};
