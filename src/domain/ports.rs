use crate::domain::model::WrittenPlaylist;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn target_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn accept(&self) -> &str;
    fn accept_language(&self) -> &str;
    fn referer(&self) -> &str;
    fn fetch_timeout(&self) -> Duration;
    fn fallback_candidates(&self) -> &[String];
    fn probe_timeout(&self) -> Duration;
    fn output_filename(&self) -> &str;
    fn default_stream_url(&self) -> &str;
}

/// fetch → extract → probe → write, one step per method.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn fetch_page(&self) -> Result<String>;
    fn extract_links(&self, html: &str) -> Vec<String>;
    async fn probe_fallbacks(&self) -> Option<String>;
    async fn write_playlist(&self, discovered: Option<String>) -> Result<WrittenPlaylist>;
}
