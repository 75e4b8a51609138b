//! Console SMS sender for development and testing.
//!
//! Logs messages instead of contacting a carrier, so fabricated test phone
//! numbers are always safe. Selected only through the explicit no-op
//! delivery mode.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use lb_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

use super::sms_sender::SmsSender;

/// SMS sender that prints to the console
pub struct ConsoleSmsSender {
    /// Number of messages "sent"
    message_count: AtomicU64,
    /// Whether to print the full message to stdout
    console_output: bool,
    /// Whether to fail every send (for testing)
    simulate_failure: bool,
}

impl ConsoleSmsSender {
    /// Create a new console sender
    pub fn new() -> Self {
        Self {
            message_count: AtomicU64::new(0),
            console_output: true,
            simulate_failure: false,
        }
    }

    /// Create a sender with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: AtomicU64::new(0),
            console_output,
            simulate_failure,
        }
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for ConsoleSmsSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            warn!(
                phone = %mask_phone_number(phone_number),
                "Console SMS sender simulating failure"
            );
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(50));
            println!("【開発モード】電話番号: {}", phone_number);
            println!("{}", message);
            println!("{}\n", "=".repeat(50));
        }

        info!(
            provider = "console",
            phone = %mask_phone_number(phone_number),
            message_id = %message_id,
            count = count,
            "SMS logged instead of sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &'static str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_returns_message_id_and_counts() {
        let sender = ConsoleSmsSender::with_options(false, false);
        let id = sender.send_sms("09012345678", "test body").await.unwrap();
        assert!(id.starts_with("console_"));
        assert_eq!(sender.message_count(), 1);
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let sender = ConsoleSmsSender::with_options(false, true);
        let result = sender.send_sms("09012345678", "test body").await;
        assert!(matches!(result, Err(InfrastructureError::Sms(_))));
        assert_eq!(sender.message_count(), 0);
    }
}
