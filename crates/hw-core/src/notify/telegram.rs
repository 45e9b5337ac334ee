use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{DeliveryError, Notifier};
use crate::config::BotConfig;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage` client bound to a single chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    send_url: String,
    chat_id: String,
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(client: Client, api_url: &Url, token: &str, chat_id: impl Into<String>) -> Self {
        let base = api_url.as_str().trim_end_matches('/');
        Self {
            client,
            send_url: format!("{base}/bot{token}/sendMessage"),
            chat_id: chat_id.into(),
        }
    }

    pub fn from_config(config: &BotConfig, client: Client) -> Self {
        Self::new(
            client,
            &config.telegram_api_url,
            &config.telegram_token,
            &config.telegram_chat_id,
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        // reqwest errors carry the URL, which contains the bot token.
        let resp = self
            .client
            .post(&self.send_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.without_url().to_string()))?;

        let status = resp.status();
        let parsed = resp.json::<ApiResponse>().await.ok();
        let description = parsed
            .as_ref()
            .and_then(|r| r.description.clone())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

        if !status.is_success() {
            return Err(DeliveryError::Http {
                status: status.as_u16(),
                description,
            });
        }

        match parsed {
            Some(r) if r.ok => {
                debug!(chat_id = %self.chat_id, "Telegram accepted message");
                Ok(())
            }
            _ => Err(DeliveryError::Rejected(description)),
        }
    }
}
