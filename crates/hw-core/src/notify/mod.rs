//! Outbound notifications.
//!
//! Delivery is best effort: [`send_message`] logs the outcome and never
//! returns an error, so a Telegram outage cannot stop the poll loop.

mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::error::ErrorKind;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request to messaging API failed: {0}")]
    Network(String),
    #[error("messaging API returned HTTP {status}: {description}")]
    Http { status: u16, description: String },
    #[error("messaging API rejected the message: {0}")]
    Rejected(String),
}

impl DeliveryError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Delivery
    }
}

/// Delivers a text message to the preconfigured recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Sends `text`, logging and swallowing any failure. Returns whether it was delivered.
pub async fn send_message(notifier: &dyn Notifier, text: &str) -> bool {
    info!("Sending message to Telegram");
    match notifier.send(text).await {
        Ok(()) => {
            info!(message = text, "Message sent");
            true
        }
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "Failed to send message");
            false
        }
    }
}
