//! Best-effort fan-out
//!
//! Runs a batch of fallible futures concurrently on the current task and keeps
//! every outcome. One future failing never cancels the others.

use std::future::Future;

use common::error::Error;
use futures::stream::{FuturesUnordered, StreamExt};

/// Outcome of one future in a batch
#[derive(Debug)]
pub enum Settled<T> {
    /// The future produced a value
    Fulfilled(T),
    /// The future failed
    Rejected(Error),
}

impl<T> Settled<T> {
    /// Whether the future produced a value
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    /// The value, if any
    pub fn ok(self) -> Option<T> {
        match self {
            Settled::Fulfilled(value) => Some(value),
            Settled::Rejected(_) => None,
        }
    }
}

impl<T> From<common::error::Result<T>> for Settled<T> {
    fn from(result: common::error::Result<T>) -> Self {
        match result {
            Ok(value) => Settled::Fulfilled(value),
            Err(err) => Settled::Rejected(err),
        }
    }
}

/// Drive every future to completion, in completion order
pub async fn settle_all<I, F, T>(futures: I) -> Vec<Settled<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = common::error::Result<T>>,
{
    let pending: FuturesUnordered<F> = futures.into_iter().collect();
    pending.map(Settled::from).collect().await
}

/// Keep only the successful outcomes
pub fn fulfilled<T>(outcomes: Vec<Settled<T>>) -> Vec<T> {
    outcomes.into_iter().filter_map(Settled::ok).collect()
}
