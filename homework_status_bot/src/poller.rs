use std::time::Duration;

use crate::{
    api::HomeworkSource,
    error::BotError,
    notifier::Notifier,
    response::{check_response, current_date, parse_status},
};

/// What the loop remembers between polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Ask only about homeworks updated after this moment.
    timestamp: i64,
    /// Last failure we told the chat about, to not spam it every poll.
    last_error: Option<String>,
}

impl PollState {
    pub fn new(timestamp: i64) -> Self {
        PollState {
            timestamp,
            last_error: None,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Do one poll: fetch, check, and tell the chat about a status change or
    /// about a failure. Never fails; failures go to the chat instead.
    pub async fn poll_once(&mut self, source: &impl HomeworkSource, notifier: &impl Notifier) {
        match self.check_for_update(source).await {
            Ok(Some(message)) => notifier.send_message(&message).await,
            Ok(None) => {}
            Err(e) => self.report_failure(&e, notifier).await,
        }
    }

    /// Returns a message to send if the newest homework changed status.
    async fn check_for_update(
        &mut self,
        source: &impl HomeworkSource,
    ) -> Result<Option<String>, BotError> {
        let response = source.get_api_answer(self.timestamp).await?;

        // Move on even if nothing changed, so the next poll doesn't
        // ask about the same period again.
        match current_date(&response) {
            Some(timestamp) => self.timestamp = timestamp,
            None => log::warn!(
                "API response has no usable 'current_date', keeping {}",
                self.timestamp
            ),
        }

        let homeworks = check_response(&response)?;
        let Some(homework) = homeworks.first() else {
            log::debug!("No change in homework status.");
            return Ok(None);
        };

        parse_status(homework).map(Some)
    }

    async fn report_failure(&mut self, error: &BotError, notifier: &impl Notifier) {
        let message = format!("Program malfunction: {error}");
        log::error!("{message}");

        if self.last_error.as_deref() == Some(message.as_str()) {
            log::debug!("Already told the chat about this failure, not repeating.");
            return;
        }

        notifier.send_message(&message).await;
        self.last_error = Some(message);
    }
}

/// Poll forever, sleeping `retry_period` after every poll however it went.
pub async fn run(
    mut state: PollState,
    source: &impl HomeworkSource,
    notifier: &impl Notifier,
    retry_period: Duration,
) {
    loop {
        state.poll_once(source, notifier).await;
        tokio::time::sleep(retry_period).await;
    }
}
