//! Notification seam for expiry transitions.
//!
//! The core only exposes transitions into expiring-soon/expired as an
//! observable event; actual delivery (email, webhooks) is a collaborator
//! behind this trait. A mock implementation is provided for tests and for
//! running without a delivery backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of expiry event being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    ExpiringSoon,
    Expired,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::ExpiringSoon => write!(f, "expiring_soon"),
            NotificationType::Expired => write!(f, "expired"),
        }
    }
}

/// Payload describing one certification expiry event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryNotification {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub certification_id: Uuid,
    pub certificate_number: String,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
}

/// Collaborator that delivers expiry notifications.
#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Deliver one expiry notification. Delivery failures are the
    /// collaborator's concern; the lifecycle transition has already
    /// committed by the time this is called.
    async fn notify_expiry(&self, notification: ExpiryNotification);
}

/// Mock implementation that records notifications for inspection.
#[derive(Debug, Default)]
pub struct MockNotificationService {
    sent: tokio::sync::Mutex<Vec<ExpiryNotification>>,
}

impl MockNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications recorded so far.
    pub async fn sent(&self) -> Vec<ExpiryNotification> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationService for MockNotificationService {
    async fn notify_expiry(&self, notification: ExpiryNotification) {
        tracing::info!(
            certification_id = %notification.certification_id,
            certificate_number = %notification.certificate_number,
            notification_type = %notification.notification_type,
            "Expiry notification recorded"
        );
        self.sent.lock().await.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_notifications() {
        let service = MockNotificationService::new();
        let notification = ExpiryNotification {
            notification_type: NotificationType::ExpiringSoon,
            certification_id: Uuid::new_v4(),
            certificate_number: "CRT-2026-00042".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            days_until_expiry: 70,
        };

        service.notify_expiry(notification.clone()).await;

        let sent = service.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].certificate_number, "CRT-2026-00042");
        assert_eq!(sent[0].notification_type, NotificationType::ExpiringSoon);
    }

    #[test]
    fn test_notification_type_display() {
        assert_eq!(NotificationType::ExpiringSoon.to_string(), "expiring_soon");
        assert_eq!(NotificationType::Expired.to_string(), "expired");
    }
}
