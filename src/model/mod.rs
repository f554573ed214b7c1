//! Model client module for chat completions.

mod client;
mod requester;

pub use client::{
    CompletionService, ModelClient, ModelConfig, ModelError, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT_SECS, MAX_OUTPUT_TOKENS, MODEL_NAME,
};
pub use requester::{
    CompletionRequester, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS,
};
