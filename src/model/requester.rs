//! Retry and error-classification policy around a completion service.

use std::time::Duration;
use tokio::time::sleep;

use super::client::{CompletionService, ModelError};
use crate::config::{get_messages, Messages};

/// Default number of attempts per prompt, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait after a rate-limited attempt in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// How often and how patiently to retry rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts including the first one. Zero is treated
    /// as one.
    pub max_attempts: u32,
    /// Fixed delay between rate-limited attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

impl RetryPolicy {
    /// Set the maximum number of attempts. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the delay between rate-limited attempts in seconds.
    pub fn with_delay_secs(mut self, delay_secs: u64) -> Self {
        self.delay = Duration::from_secs(delay_secs);
        self
    }
}

/// Turns a prompt into a printable reply, whatever the service does.
pub struct CompletionRequester<S> {
    service: S,
    policy: RetryPolicy,
    messages: &'static Messages,
}

impl<S: CompletionService> CompletionRequester<S> {
    /// Create a requester with the default retry policy and Spanish messages.
    pub fn new(service: S) -> Self {
        Self {
            service,
            policy: RetryPolicy::default(),
            messages: get_messages("es"),
        }
    }

    /// Use a custom retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use the given message table for diagnostics and fixed replies.
    pub fn with_messages(mut self, messages: &'static Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Request a completion for `prompt`.
    ///
    /// Returns the model's reply, or one of the fixed localized error strings.
    /// Only rate limits are retried; every other failure ends the call after
    /// the attempt that produced it.
    pub async fn request_completion(&self, prompt: &str) -> String {
        let max_attempts = self.policy.max_attempts.max(1);
        let delay_secs = self.policy.delay.as_secs();

        for attempt in 1..=max_attempts {
            let err = match self.service.complete(prompt).await {
                Ok(text) => return text,
                Err(e) => e,
            };

            match err {
                ModelError::Authentication(detail) => {
                    tracing::debug!(attempt, %detail, "Authentication rejected");
                    eprintln!("{}", self.messages.auth_diagnostic);
                    return self.messages.auth_error.to_string();
                }
                ModelError::Connection(detail) => {
                    tracing::debug!(attempt, %detail, "Could not reach completion service");
                    eprintln!("{}", self.messages.connection_diagnostic);
                    return self.messages.connection_error.to_string();
                }
                ModelError::RateLimited(detail) => {
                    tracing::debug!(attempt, max_attempts, %detail, "Rate limited");
                    if attempt < max_attempts {
                        eprintln!(
                            "{}",
                            self.messages
                                .rate_limit_notice(attempt, max_attempts, Some(delay_secs))
                        );
                        sleep(self.policy.delay).await;
                    } else {
                        eprintln!(
                            "{}",
                            self.messages.rate_limit_notice(attempt, max_attempts, None)
                        );
                    }
                }
                e @ ModelError::Api { .. } => {
                    tracing::debug!(attempt, error = %e, "Completion service returned an error");
                    eprintln!("{} {}", self.messages.api_diagnostic, e);
                    return self.messages.api_error.to_string();
                }
                ModelError::Unknown(detail) => {
                    tracing::debug!(attempt, %detail, "Unexpected completion failure");
                    eprintln!("{} {}", self.messages.unknown_diagnostic, detail);
                    return self.messages.unknown_error.to_string();
                }
            }
        }

        self.messages.retries_exhausted.to_string()
    }
}
