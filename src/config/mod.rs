//! Configuration module for the chat assistant.

mod i18n;

pub use i18n::{get_messages, Messages, MESSAGES_EN, MESSAGES_ES};
