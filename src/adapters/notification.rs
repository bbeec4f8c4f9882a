use crate::core::NotificationGateway;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Gateway that logs each message and keeps it in an outbox instead of
/// handing it to a mail transport.
#[derive(Debug, Default)]
pub struct OutboxNotificationGateway {
    outbox: Mutex<Vec<SentEmail>>,
}

impl OutboxNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().await.clone()
    }

    pub async fn drain(&self) -> Vec<SentEmail> {
        std::mem::take(&mut *self.outbox.lock().await)
    }
}

#[async_trait]
impl NotificationGateway for OutboxNotificationGateway {
    async fn send_email(&self, address: &str, subject: &str, body: &str) -> Result<()> {
        tracing::info!(to = address, subject, "Email queued");
        self.outbox.lock().await.push(SentEmail {
            to: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outbox_records_and_drains() {
        let gateway = OutboxNotificationGateway::new();
        gateway
            .send_email("student@test.com", "Enrollment Confirmation", "CS101")
            .await
            .unwrap();

        let sent = gateway.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "student@test.com");

        assert_eq!(gateway.drain().await.len(), 1);
        assert!(gateway.sent().await.is_empty());
    }
}
