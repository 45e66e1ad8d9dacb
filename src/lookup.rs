use std::sync::Arc;

use tokio::runtime::Handle;

use crate::avatar::DecodedImage;
use crate::fetcher::Fetcher;
use crate::home::HomeContext;
use crate::outcome::Outcome;
use crate::pipeline::LookupPipeline;

/// Callback-style entry point for a presentation layer.
///
/// Each [`lookup`](Self::lookup) runs the pipeline on the runtime, then hands the outcome to
/// the home context, so `on_complete` always runs there and never on a worker thread. Calls
/// are not serialized or cancellable; overlapping lookups race independently.
pub struct Lookup<F> {
    pipeline: Arc<LookupPipeline<F>>,
    runtime: Handle,
    home: Arc<dyn HomeContext>,
}

impl<F> Clone for Lookup<F> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            runtime: self.runtime.clone(),
            home: self.home.clone(),
        }
    }
}

impl<F> Lookup<F>
where
    F: Fetcher + Clone + 'static,
{
    pub fn new(pipeline: LookupPipeline<F>, runtime: Handle, home: impl HomeContext) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            runtime,
            home: Arc::new(home),
        }
    }

    /// Starts a lookup and returns immediately. `on_complete` is called at most once: it is
    /// skipped if the home context is gone by the time the pipeline finishes.
    pub fn lookup<C>(&self, username: impl Into<String>, on_complete: C)
    where
        C: FnOnce(Outcome<DecodedImage>) + Send + 'static,
    {
        let username = username.into();
        let pipeline = self.pipeline.clone();
        let home = self.home.clone();

        self.runtime.spawn(async move {
            let outcome = pipeline.run(&username).await;
            home.dispatch(Box::new(move || on_complete(outcome)));
        });
    }
}
