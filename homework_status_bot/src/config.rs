use std::time::Duration;

use teloxide::types::{ChatId, Recipient};
use thiserror::Error;
use url::Url;

use crate::{DEFAULT_ENDPOINT, DEFAULT_RETRY_PERIOD};

/// Environment variables that must be set for the bot to do anything at all.
pub static REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("TELEGRAM_CHAT_ID must be a numeric chat ID or an @channel_username, got {0:?}")]
    InvalidChatId(String),
    #[error("HOMEWORK_API_ENDPOINT is not a valid URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("HOMEWORK_POLL_INTERVAL_SECS must be a positive number of seconds, got {0:?}")]
    InvalidPollInterval(String),
}

/// Everything the bot needs to know, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat: Recipient,
    pub endpoint: Url,
    pub retry_period: Duration,
}

impl Config {
    /// Read the config from the process environment.
    ///
    /// # Errors
    /// Errors if any of [`REQUIRED_VARS`] is missing or empty, or if something
    /// that was set fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`], but variables come from `lookup`.
    /// Empty or whitespace-only values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|x| !x.trim().is_empty());

        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));

        let [practicum_var, telegram_var, chat_var] = REQUIRED_VARS;
        let practicum_token = require(practicum_var)?;
        let telegram_token = require(telegram_var)?;
        let chat_id = require(chat_var)?;

        let chat = parse_chat(chat_id.trim())?;

        let endpoint = match get("HOMEWORK_API_ENDPOINT") {
            Some(endpoint) => Url::parse(endpoint.trim())?,
            None => Url::parse(DEFAULT_ENDPOINT)?,
        };

        let retry_period = match get("HOMEWORK_POLL_INTERVAL_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidPollInterval(secs)),
            },
            None => DEFAULT_RETRY_PERIOD,
        };

        Ok(Config {
            practicum_token,
            telegram_token,
            chat,
            endpoint,
            retry_period,
        })
    }
}

/// Telegram accepts either a numeric chat ID or a public channel's `@username`.
fn parse_chat(chat_id: &str) -> Result<Recipient, ConfigError> {
    if let Ok(id) = chat_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }

    match chat_id.strip_prefix('@') {
        Some(username) if !username.is_empty() && !username.contains(char::is_whitespace) => {
            Ok(Recipient::ChannelUsername(chat_id.to_string()))
        }
        _ => Err(ConfigError::InvalidChatId(chat_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const ALL_REQUIRED: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "practicum"),
        ("TELEGRAM_TOKEN", "123:telegram"),
        ("TELEGRAM_CHAT_ID", "-100500"),
    ];

    #[test]
    fn all_required_present() {
        let config = Config::from_lookup(lookup_from(&ALL_REQUIRED)).unwrap();
        assert_eq!(config.practicum_token, "practicum");
        assert_eq!(config.telegram_token, "123:telegram");
        assert_eq!(config.chat, Recipient::Id(ChatId(-100500)));
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.retry_period, DEFAULT_RETRY_PERIOD);
    }

    #[test]
    fn any_missing_secret_is_fatal() {
        for missing in REQUIRED_VARS {
            let vars: Vec<_> = ALL_REQUIRED
                .into_iter()
                .filter(|(name, _)| *name != missing)
                .collect();
            let result = Config::from_lookup(lookup_from(&vars));
            assert!(
                matches!(result, Err(ConfigError::MissingVar(name)) if name == missing),
                "{missing}: {result:?}"
            );
        }
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let mut vars = ALL_REQUIRED.to_vec();
        vars[1] = ("TELEGRAM_TOKEN", "   ");
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::MissingVar("TELEGRAM_TOKEN"))
        ));
    }

    #[test]
    fn first_missing_secret_is_reported() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("PRACTICUM_TOKEN"))
        ));
    }

    #[test]
    fn chat_ids() {
        assert_eq!(parse_chat("12345").unwrap(), Recipient::Id(ChatId(12345)));
        assert_eq!(
            parse_chat("@amogus").unwrap(),
            Recipient::ChannelUsername("@amogus".to_string())
        );
        assert!(parse_chat("amogus").is_err());
        assert!(parse_chat("@").is_err());
    }

    #[test]
    fn overrides() {
        let mut vars = ALL_REQUIRED.to_vec();
        vars.push(("HOMEWORK_API_ENDPOINT", "http://127.0.0.1:8080/statuses/"));
        vars.push(("HOMEWORK_POLL_INTERVAL_SECS", "30"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:8080/statuses/");
        assert_eq!(config.retry_period, Duration::from_secs(30));

        vars.pop();
        vars.push(("HOMEWORK_POLL_INTERVAL_SECS", "0"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidPollInterval(_))
        ));

        let mut vars = ALL_REQUIRED.to_vec();
        vars.push(("HOMEWORK_API_ENDPOINT", "not a url"));
        assert!(matches!(
            Config::from_lookup(lookup_from(&vars)),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }
}
