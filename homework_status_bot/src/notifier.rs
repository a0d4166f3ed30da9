use std::future::Future;

use teloxide::{prelude::Requester, types::Recipient, Bot};

/// Somewhere to tell the student about things.
pub trait Notifier {
    /// Deliver `text`. Failing to deliver is logged and otherwise ignored:
    /// reporting it through the same channel would just fail again.
    fn send_message(&self, text: &str) -> impl Future<Output = ()> + Send;
}

/// Sends plain text messages to one Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat: Recipient) -> Self {
        TelegramNotifier { bot, chat }
    }
}

impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) {
        match self.bot.send_message(self.chat.clone(), text).await {
            Ok(_) => log::debug!("Sent a message: {text}"),
            Err(e) => log::error!("Failed to send a message to {:?}: {e}", self.chat),
        }
    }
}
