//! LLM provider implementations

pub mod gemini;

use async_trait::async_trait;

// Re-export for convenience
pub use gemini::GeminiClient;

/// A text-completion service
///
/// Transport, auth and deadlines all live behind this trait; the
/// orchestrator only sees the reply text or an error.
#[async_trait]
pub trait ModelClient: Send + Sync
{   async fn generate_content(&self, prompt: &str)
      -> Result<crate::request::ModelReply, crate::error::Error>;
}
