//! Presentation state for the lookup screen: a username field, a download button, a spinner
//! and the avatar view, without any actual widgets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::avatar::DecodedImage;
use crate::fetcher::Fetcher;
use crate::lookup::Lookup;

/// What the screen shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A lookup is in flight; spinner on, button off.
    Loading,
    /// The last lookup produced this avatar.
    Loaded(DecodedImage),
    /// The last lookup failed. Nothing is rendered and no error message is shown.
    Failed,
}

impl ScreenState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn spinner_visible(&self) -> bool {
        self.is_loading()
    }

    pub fn download_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn avatar(&self) -> Option<&DecodedImage> {
        match self {
            Self::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

/// Whether the screen a completion was started for still exists.
///
/// Completions check this before touching state; once revoked they are discarded.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn revoke(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The lookup screen. Owned by the home context; completions land there too.
pub struct LookupScreen<F> {
    lookup: Lookup<F>,
    username: String,
    state: Arc<Mutex<ScreenState>>,
    liveness: Liveness,
}

impl<F> LookupScreen<F>
where
    F: Fetcher + Clone + 'static,
{
    pub fn new(lookup: Lookup<F>) -> Self {
        Self {
            lookup,
            username: String::new(),
            state: Arc::default(),
            liveness: Liveness::default(),
        }
    }

    /// Mirrors the username text field.
    pub fn set_username(&mut self, text: impl Into<String>) {
        self.username = text.into();
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> ScreenState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// The download button. Ignored while a lookup is in flight, since the button is disabled.
    /// Returns whether a lookup was started.
    pub fn tap_download(&self) -> bool {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.download_enabled() {
                return false;
            }
            *state = ScreenState::Loading;
        }

        let state = self.state.clone();
        let liveness = self.liveness.clone();
        self.lookup.lookup(self.username.clone(), move |outcome| {
            if !liveness.is_live() {
                debug!("screen closed before lookup finished");
                return;
            }
            let next = match outcome {
                Ok(image) => ScreenState::Loaded(image),
                Err(_) => ScreenState::Failed,
            };
            *state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        });
        true
    }

    /// Tears the screen down; later completions are dropped.
    pub fn close(&self) {
        self.liveness.revoke();
    }
}

impl<F> Drop for LookupScreen<F> {
    fn drop(&mut self) {
        self.liveness.revoke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_disables_download_and_shows_spinner() {
        assert!(ScreenState::Idle.download_enabled());
        assert!(!ScreenState::Idle.spinner_visible());
        assert!(!ScreenState::Loading.download_enabled());
        assert!(ScreenState::Loading.spinner_visible());
        assert!(ScreenState::Failed.download_enabled());
        assert!(ScreenState::Failed.avatar().is_none());
    }

    #[test]
    fn liveness_revokes_across_clones() {
        let liveness = Liveness::default();
        let copy = liveness.clone();
        assert!(copy.is_live());
        liveness.revoke();
        assert!(!copy.is_live());
    }
}
