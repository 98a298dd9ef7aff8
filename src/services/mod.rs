pub mod notification_queue;
pub mod notifier;

pub use notification_queue::{Notification, NotificationQueue};
pub use notifier::{LogNotifier, Notifier, NotifyError, RedisNotifier};
