//! User-visible notifications (toasts)

use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Fan-out of notifications to every subscribed UI
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier {
    /// `capacity` is the backlog a slow subscriber may fall behind by (at least 1)
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn send(&self, notification: Notification) {
        // No subscribers is fine
        let _ = self.sender.send(notification);
    }

    pub fn info(&self, title: impl Into<String>, description: impl Into<String>) {
        self.send(Notification::new(NotificationLevel::Info, title, description));
    }

    pub fn error(&self, title: impl Into<String>, description: impl Into<String>) {
        self.send(Notification::new(NotificationLevel::Error, title, description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive() {
        let notifier = Notifier::default();
        let mut rx1 = notifier.subscribe();
        let mut rx2 = notifier.subscribe();

        notifier.error("Oops!", "Could not save editor");

        let received = rx1.recv().await.unwrap();
        assert_eq!(received.level, NotificationLevel::Error);
        assert_eq!(received.title, "Oops!");
        assert!(received.timestamp > 0);
        assert_eq!(rx2.recv().await.unwrap(), received);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let notifier = Notifier::new(0);
        let mut rx = notifier.subscribe();

        notifier.info("Success", "Saved Editor");
        assert_eq!(rx.recv().await.unwrap().description, "Saved Editor");
    }

    #[test]
    fn test_send_without_subscribers() {
        let notifier = Notifier::new(4);
        notifier.info("Success", "Saved");
    }
}
