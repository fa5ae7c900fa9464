//! # assist-adapters
//!
//! Implementations of the `TextAssist` port. The gateway is best-effort by
//! contract: callers (the assist service) absorb every error, so adapters
//! here report failures honestly instead of faking success.

use async_trait::async_trait;

use domains::{AppError, Result, TextAssist};

#[cfg(feature = "assist-http")]
pub mod http;

#[cfg(feature = "assist-http")]
pub use http::HttpAssistGateway;

/// Stand-in for deployments without an assist endpoint: every call fails,
/// and the service layer degrades to the original text.
pub struct DisabledAssist;

#[async_trait]
impl TextAssist for DisabledAssist {
    async fn complete(&self, _instruction: &str, _payload: &str) -> Result<String> {
        Err(AppError::Backend("assist gateway is disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_assist_always_errors() {
        let result = DisabledAssist.complete("summarize", "본문").await;
        assert!(matches!(result, Err(AppError::Backend(_))));
    }
}
