use anyhow::Result;
use async_trait::async_trait;

/// Where encoded stacks are kept between sessions.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load_encoding(&self, session: &str) -> Result<Option<String>>;
    async fn save_encoding(&self, session: &str, encoding: &str) -> Result<()>;
}
