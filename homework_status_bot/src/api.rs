use std::{future::Future, time::Duration};

use reqwest::{header::AUTHORIZATION, Client, ClientBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::BotError;

/// Something that can be asked about homeworks updated since some moment.
pub trait HomeworkSource {
    /// Get the raw API answer for homeworks updated at or after `from_date`,
    /// a unix timestamp.
    fn get_api_answer(&self, from_date: i64) -> impl Future<Output = Result<Value, BotError>> + Send;
}

/// The Practicum homework statuses API.
pub struct PracticumApi {
    client: Client,
    endpoint: Url,
    token: String,
}

/// HTTP client settings for talking to the API. Never wait on it forever.
fn client_builder() -> ClientBuilder {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
}

impl PracticumApi {
    /// # Errors
    /// Errors if the HTTP client fails to build, which basically means TLS is broken.
    pub fn new(endpoint: Url, token: &str) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(client_builder().build()?, endpoint, token))
    }

    pub fn with_client(client: Client, endpoint: Url, token: &str) -> Self {
        PracticumApi {
            client,
            endpoint,
            token: token.to_string(),
        }
    }
}

impl HomeworkSource for PracticumApi {
    async fn get_api_answer(&self, from_date: i64) -> Result<Value, BotError> {
        // The URL has `from_date` in it, which would make otherwise identical
        // errors look different from poll to poll. Hence `without_url`.
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::Connectivity(e.without_url()))?;

        let status = response.status();
        if status != StatusCode::OK {
            log::error!("Homework API answered with status {status}");
            return Err(BotError::ApiStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| BotError::InvalidJson(e.without_url()))
    }
}
