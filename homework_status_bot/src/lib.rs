//! Source code for the homework status bot. It watches the Practicum
//! homework API and tells a Telegram chat whenever a review status changes.

use std::time::Duration;

/// Reading the environment into something usable.
mod config;

/// Errors that can happen during a poll.
mod error;

/// Talking to the homework API.
mod api;

/// Checking what the API gave us and turning it into messages.
mod response;

/// Sending messages to the chat.
mod notifier;

/// The polling loop.
mod poller;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;

/// Where to ask about homework statuses, unless overridden.
pub static DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// How long to wait between polls, unless overridden.
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
