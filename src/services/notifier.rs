use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to publish notification: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Failed to serialize notification: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// Best-effort outbound message sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Email job as consumed by the mail worker listening on the Redis channel.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub queued_at: DateTime<Utc>,
}

/// Publishes email jobs to a Redis channel.
#[derive(Clone, Debug)]
pub struct RedisNotifier {
    client: Arc<redis::Client>,
    channel: String,
}

impl RedisNotifier {
    pub fn new(client: Arc<redis::Client>, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl Notifier for RedisNotifier {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let job = EmailJob {
            to: contact.to_string(),
            subject: subject.to_string(),
            html: body.to_string(),
            queued_at: Utc::now(),
        };
        let message = serde_json::to_string(&job)?;

        let mut conn = self.client.get_async_connection().await?;
        let receivers: i64 = conn.publish(&self.channel, message).await?;
        tracing::debug!(
            "📢 Published email job for {} on '{}' ({} receivers)",
            contact,
            self.channel,
            receivers
        );
        Ok(())
    }
}

/// Writes notifications to the log only. Used when no Redis is configured.
#[derive(Clone, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, contact: &str, subject: &str, _body: &str) -> Result<(), NotifyError> {
        tracing::info!("✉️ Notification for {}: {}", contact, subject);
        Ok(())
    }
}
