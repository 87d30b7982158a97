//! Prompt Delivery
//!
//! Hands the final prompt to an LLM. Launching is synchronous with respect to
//! the caller: a mechanism that cannot be started fails `launch`. Completion
//! runs on a spawned task and is observed through [`DeliveryHandle`].

mod command;
mod gemini;

pub use command::CommandDelivery;
pub use gemini::GeminiApiDelivery;

use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::{DeliveryConfig, DeliveryMethod};
use crate::constants::delivery::REPORT_EXCERPT_CHARS;
use crate::types::{Result, ReviewError};

#[async_trait]
pub trait PromptDelivery: Send + Sync {
    fn name(&self) -> &str;

    /// Start delivering `prompt`; must be called inside a tokio runtime
    async fn launch(&self, prompt: &str) -> Result<DeliveryHandle>;
}

/// Outcome of one finished delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub method: String,
    pub success: bool,
    /// Process exit code, or HTTP status for API deliveries
    pub exit_code: Option<i32>,
    /// Start of the response (or of stderr on failure)
    pub excerpt: String,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// A running delivery
pub struct DeliveryHandle {
    method: String,
    task: JoinHandle<Result<DeliveryReport>>,
}

impl std::fmt::Debug for DeliveryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryHandle")
            .field("method", &self.method)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

impl DeliveryHandle {
    pub fn spawn<F>(method: impl Into<String>, work: F) -> Self
    where
        F: Future<Output = Result<DeliveryReport>> + Send + 'static,
    {
        Self {
            method: method.into(),
            task: tokio::spawn(work),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Wait for completion
    pub async fn wait(self) -> Result<DeliveryReport> {
        self.task
            .await
            .map_err(|e| ReviewError::delivery(self.method, format!("task aborted: {}", e)))?
    }
}

pub fn create_delivery(config: &DeliveryConfig) -> Result<Box<dyn PromptDelivery>> {
    Ok(match config.method {
        DeliveryMethod::Command => Box::new(CommandDelivery::new(config.command.clone())?),
        DeliveryMethod::Gemini => Box::new(GeminiApiDelivery::new(config.gemini.clone())?),
    })
}

/// First `REPORT_EXCERPT_CHARS` characters, trimmed
pub(crate) fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= REPORT_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(REPORT_EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("  ok \n"), "ok");
        let long = "가".repeat(REPORT_EXCERPT_CHARS + 10);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), REPORT_EXCERPT_CHARS + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_create_delivery_by_method() {
        let config = DeliveryConfig::default();
        assert_eq!(create_delivery(&config).unwrap().name(), "command");

        let mut config = DeliveryConfig::default();
        config.method = DeliveryMethod::Gemini;
        config.gemini.api_key = Some("test-key".to_string());
        assert_eq!(create_delivery(&config).unwrap().name(), "gemini");
    }

    #[tokio::test]
    async fn test_handle_reports_task_result() {
        let handle = DeliveryHandle::spawn("test", async {
            Ok(DeliveryReport {
                method: "test".to_string(),
                success: true,
                exit_code: Some(0),
                excerpt: "done".to_string(),
                elapsed: Duration::from_millis(5),
            })
        });
        assert_eq!(handle.method(), "test");
        let report = handle.wait().await.unwrap();
        assert!(report.success);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["elapsed_ms"], 5);
    }

    #[tokio::test]
    async fn test_handle_propagates_failure() {
        let handle = DeliveryHandle::spawn("test", async {
            Err(ReviewError::delivery("test", "connection refused"))
        });
        let err = handle.wait().await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
