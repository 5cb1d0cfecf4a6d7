//! Retry logic with exponential backoff for ESI lookups.

use std::{future::Future, pin::Pin, time::Duration};

use dioxus_logger::tracing;

use crate::server::error::{retry::ErrorRetryStrategy, Error};

/// Context for executing operations with automatic retry logic and caching.
///
/// The cache `T` persists between attempts so data fetched before a transient failure is not
/// fetched again. Only errors classified as [`ErrorRetryStrategy::Retry`] are retried, with
/// exponential backoff (1s, 2s, 4s, ...) up to `max_attempts`.
///
/// ```ignore
/// let mut ctx: RetryContext<CharacterLookupCache> = RetryContext::new();
/// let esi_client = esi_client.clone();
///
/// ctx.execute_with_retry("lookup of character ID 123", |cache| {
///     let esi_client = esi_client.clone();
///
///     Box::pin(async move {
///         if cache.character.is_none() {
///             cache.character = Some(
///                 esi_client.character().get_character_public_information(123).await?,
///             );
///         }
///         // ...
///     })
/// }).await?;
/// ```
pub struct RetryContext<T> {
    cache: T,
    max_attempts: u32,
    initial_backoff: Duration,
}

pub type RetryFuture<'a, R> = Pin<Box<dyn Future<Output = Result<R, Error>> + Send + 'a>>;

impl<T> RetryContext<T>
where
    T: Clone + Default,
{
    const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::with_backoff(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_INITIAL_BACKOFF)
    }

    pub fn with_backoff(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            cache: T::default(),
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Execute an operation, retrying transient failures.
    ///
    /// # Arguments
    /// - `description`: Description of the operation for logging (e.g., "lookup of character ID 1")
    /// - `operation`: Async function receiving the retry cache
    pub async fn execute_with_retry<R, F>(
        &mut self,
        description: &str,
        operation: F,
    ) -> Result<R, Error>
    where
        F: for<'a> Fn(&'a mut T) -> RetryFuture<'a, R>,
    {
        let mut attempt_count = 0;

        loop {
            tracing::debug!(
                "Processing {} (attempt {}/{})",
                description,
                attempt_count + 1,
                self.max_attempts
            );

            let result = operation(&mut self.cache).await;

            match result {
                Ok(result) => {
                    tracing::debug!("Successfully processed {}", description);
                    return Ok(result);
                }
                Err(e) => match e.to_retry_strategy() {
                    ErrorRetryStrategy::Fail => {
                        tracing::debug!("Permanent error for {}: {:?}", description, e);
                        return Err(e);
                    }
                    ErrorRetryStrategy::Retry => {
                        attempt_count += 1;
                        if attempt_count >= self.max_attempts {
                            tracing::error!(
                                "Max attempts ({}) exceeded for {}: {:?}",
                                self.max_attempts,
                                description,
                                e
                            );
                            return Err(e);
                        }

                        let backoff = self.initial_backoff * 2_u32.pow(attempt_count - 1);

                        tracing::warn!(
                            "Retrying {} (attempt {}/{}) after {:?}: {:?}",
                            description,
                            attempt_count,
                            self.max_attempts,
                            backoff,
                            e
                        );

                        tokio::time::sleep(backoff).await;
                    }
                },
            }
        }
    }
}

impl<T> Default for RetryContext<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new()
    }
}
