use thiserror::Error;

/// Anything that can go wrong during one poll. None of these are fatal: the
/// loop reports them to the chat and tries again next time.
#[derive(Debug, Error)]
pub enum BotError {
    /// Couldn't reach the API at all.
    #[error("Failed to reach the homework API: {0}")]
    Connectivity(#[source] reqwest::Error),
    /// The API answered, but not with 200.
    #[error("Homework API is unavailable. Response status code: {0}")]
    ApiStatus(u16),
    /// The API answered 200 with something that isn't JSON.
    #[error("Homework API returned a body that is not valid JSON: {0}")]
    InvalidJson(#[source] reqwest::Error),
    #[error("API response is not a JSON object")]
    NotAMapping,
    #[error("Key '{0}' is missing from the API response")]
    MissingKey(&'static str),
    #[error("Value of key '{key}' in the API response is not {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    #[error("Key 'status' is missing from the homework")]
    MissingStatus,
    #[error("Unexpected homework status: {0}")]
    UnknownStatus(String),
    #[error("Key 'homework_name' is missing from the homework")]
    MissingName,
}
