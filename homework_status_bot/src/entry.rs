use teloxide::Bot;

use crate::{
    api::PracticumApi,
    config::Config,
    notifier::TelegramNotifier,
    poller::{run, PollState},
};

/// Check the config and poll the homework API until killed.
///
/// Exits the process with status 1 if the config is incomplete or broken,
/// before anything is polled.
pub async fn entry() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}. Can't work like this, stopping.");
            std::process::exit(1);
        }
    };

    let api = match PracticumApi::new(config.endpoint.clone(), &config.practicum_token) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Failed to create the HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_token);
    let notifier = TelegramNotifier::new(bot, config.chat.clone());

    let state = PollState::new(chrono::Utc::now().timestamp());

    log::info!(
        "Polling {} every {} seconds from {}, reporting to {:?}",
        config.endpoint,
        config.retry_period.as_secs(),
        state.timestamp(),
        config.chat
    );

    tokio::select! {
        _ = run(state, &api, &notifier, config.retry_period) => {},
        _ = tokio::signal::ctrl_c() => {},
    }

    log::info!("it appears we have been bonked.");
}
