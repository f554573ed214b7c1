// Copyright 2025 ModerRAS (Rust implementation)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Chat Assistant
//!
//! Minimal command-line chat client for OpenAI-compatible chat-completion
//! APIs. Each prompt is sent as a single user message; rate-limited calls
//! are retried with a fixed delay and every other failure is turned into a
//! short localized message.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chat_assistant::{CompletionRequester, ModelClient, ModelConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ModelConfig::default().with_api_key("sk-...");
//!     let requester = CompletionRequester::new(ModelClient::new(config)?);
//!
//!     let reply = requester.request_completion("¿Qué es Rust?").await;
//!     println!("🤖 Asistente: {}", reply);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod model;
pub mod session;
pub mod settings;

pub use config::{get_messages, Messages};
pub use model::{
    CompletionRequester, CompletionService, ModelClient, ModelConfig, ModelError, RetryPolicy,
};
pub use session::ChatSession;
pub use settings::{AppSettings, ConfigError};
