use std::{fmt::Display, str::FromStr};

use serde_json::Value;

use crate::error::BotError;

/// Review status of a homework, as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable text to tell the student about this status.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => {
                "The work has been reviewed: the reviewer liked everything. Hooray!"
            }
            HomeworkStatus::Reviewing => "The work has been taken for review by the reviewer.",
            HomeworkStatus::Rejected => "The work has been reviewed: the reviewer has some remarks.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "approved" => Ok(HomeworkStatus::Approved),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

impl Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that the API answer looks like the docs say, and return the list of
/// homeworks in it. The list may be empty, and is newest first.
pub fn check_response(response: &Value) -> Result<&Vec<Value>, BotError> {
    let Some(response) = response.as_object() else {
        return Err(BotError::NotAMapping);
    };

    let Some(homeworks) = response.get("homeworks") else {
        log::error!("Key 'homeworks' is missing from the API response");
        return Err(BotError::MissingKey("homeworks"));
    };

    homeworks.as_array().ok_or(BotError::WrongType {
        key: "homeworks",
        expected: "a list",
    })
}

/// Server-side timestamp to use as `from_date` next time, if the answer has one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date")?.as_i64()
}

/// Turn a single homework into a message about its status.
///
/// # Errors
/// Each of missing status, unknown status and missing name is its own
/// [`BotError`] variant, so it's clear what exactly the API broke.
pub fn parse_status(homework: &Value) -> Result<String, BotError> {
    let status = match homework.get("status") {
        None | Some(Value::Null) => {
            log::error!("Homework has no status");
            return Err(BotError::MissingStatus);
        }
        Some(Value::String(status)) => status.parse::<HomeworkStatus>(),
        Some(other) => Err(BotError::UnknownStatus(other.to_string())),
    };
    let status = status.inspect_err(|e| log::error!("{e}"))?;

    let name = match homework.get("homework_name") {
        None | Some(Value::Null) => {
            log::error!("Homework has no 'homework_name'");
            return Err(BotError::MissingName);
        }
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };

    Ok(format!(
        "Status changed for submission \"{name}\".\n{}",
        status.verdict()
    ))
}
