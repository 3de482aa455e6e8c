//! Bounded retry on dropped store connections.
//!
//! [`retry`] runs an attempt, and when it fails with a transient error it runs the same
//! attempt again, up to [`RetryPolicy::max_retries`] more times. The attempt counter lives
//! on the stack of a single call, so unrelated operations never share a budget.

use std::future::Future;

use tracing::{error, warn};

use crate::error::DocumentStoreResult;

/// How many times a single operation may be reissued after a dropped connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_RETRIES: usize = 5;

    pub fn new(max_retries: usize) -> Self {
        Self { max_retries }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self { max_retries: 0 }
    }

    /// Total number of attempts, initial one included.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_RETRIES)
    }
}

/// Runs `attempt` until it succeeds, fails with a non-transient error, or the retry
/// budget is spent.
///
/// `attempt` is invoked afresh for every try, so anything it accumulates is discarded
/// along with a failed attempt. The error returned on give-up is the last transient
/// error, unchanged.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    collection: &str,
    mut attempt: F,
) -> DocumentStoreResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DocumentStoreResult<T>>,
{
    let mut retries = 0usize;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if retries < policy.max_retries => {
                warn!(
                    operation,
                    collection,
                    attempt = retries,
                    error = %err,
                    "store reconnecting, retrying operation"
                );
                retries += 1;
            }
            Err(err) => {
                error!(
                    operation,
                    collection,
                    attempt = retries,
                    error = %err,
                    "giving up on store connection"
                );
                return Err(err);
            }
        }
    }
}
