use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::services::notifier::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub contact: String,
    pub subject: String,
    pub body: String,
}

/// Fire-and-forget fan-out of notifications.
///
/// Messages are handed to a background worker which delivers them one by one
/// through the configured [`Notifier`]. Delivery errors are logged and
/// dropped; callers never wait for delivery.
#[derive(Clone, Debug)]
pub struct NotificationQueue {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationQueue {
    /// Spawns the delivery worker on the current tokio runtime. The worker
    /// stops once every queue handle has been dropped.
    pub fn start(notifier: Arc<dyn Notifier>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();

        let worker = tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                match notifier
                    .notify(
                        &notification.contact,
                        &notification.subject,
                        &notification.body,
                    )
                    .await
                {
                    Ok(()) => tracing::debug!(
                        "Delivered notification '{}' to {}",
                        notification.subject,
                        notification.contact
                    ),
                    Err(e) => tracing::error!(
                        "❌ Failed to deliver notification '{}' to {}: {}",
                        notification.subject,
                        notification.contact,
                        e
                    ),
                }
            }
            tracing::info!("🛑 Notification worker stopped");
        });

        (Self { sender }, worker)
    }

    pub fn enqueue(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            tracing::warn!(
                "Notification worker is gone, dropping '{}' for {}",
                e.0.subject,
                e.0.contact
            );
        }
    }
}
