//! Async stages that chain into a pipeline.
//!
//! A [`Stage`] turns an input into an [`Outcome`]. [`Stage::then`] composes two stages so the
//! second one only runs after the first one succeeded; the first failure ends the chain.

use async_trait::async_trait;

use crate::outcome::Outcome;

#[async_trait]
pub trait Stage<In: Send + 'static>: Send + Sync {
    type Out: Send + 'static;

    async fn run(&self, input: In) -> Outcome<Self::Out>;

    /// Runs `next` on this stage's output.
    fn then<S>(self, next: S) -> Then<Self, S>
    where
        Self: Sized,
        S: Stage<Self::Out>,
    {
        Then { first: self, second: next }
    }
}

/// Two stages run back to back, see [`Stage::then`].
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

#[async_trait]
impl<In, A, B> Stage<In> for Then<A, B>
where
    In: Send + 'static,
    A: Stage<In>,
    B: Stage<A::Out>,
{
    type Out = B::Out;

    async fn run(&self, input: In) -> Outcome<B::Out> {
        let mid = self.first.run(input).await?;
        self.second.run(mid).await
    }
}
