use crate::domain::model::ChatMessage;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// A text-in, text-out generative model.
///
/// Every component that holds one also has a deterministic fallback, so
/// implementations are free to fail; callers log and degrade.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Continues a conversation; `history` is oldest first.
    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String>;
}
