use crate::core::extractor::extract_m3u8_links;
use crate::core::{ConfigProvider, Pipeline, PlaylistDocument, Storage, WrittenPlaylist};
use crate::utils::error::Result;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{redirect, Client};

pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    // HEAD probes judge the candidate's own status; a 3xx is not reachable.
    probe_client: Client,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let probe_client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            storage,
            config,
            client: Client::new(),
            probe_client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    async fn fetch_page(&self) -> Result<String> {
        tracing::debug!("Fetching page: {}", self.config.target_url());

        let response = self
            .client
            .get(self.config.target_url())
            .header(USER_AGENT, self.config.user_agent())
            .header(ACCEPT, self.config.accept())
            .header(ACCEPT_LANGUAGE, self.config.accept_language())
            .header(REFERER, self.config.referer())
            .timeout(self.config.fetch_timeout())
            .send()
            .await?;

        tracing::debug!("Page response status: {}", response.status());

        // 不論 HTTP 狀態與宣告的編碼，一律以 UTF-8 解碼
        let body = response.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn extract_links(&self, html: &str) -> Vec<String> {
        extract_m3u8_links(html)
    }

    async fn probe_fallbacks(&self) -> Option<String> {
        for candidate in self.config.fallback_candidates() {
            tracing::debug!("Probing fallback: {}", candidate);

            match self
                .probe_client
                .head(candidate)
                .timeout(self.config.probe_timeout())
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    return Some(candidate.clone());
                }
                Ok(response) => {
                    tracing::debug!("{} answered {}", candidate, response.status());
                }
                Err(e) => {
                    tracing::debug!("{} unreachable: {}", candidate, e);
                }
            }
        }

        None
    }

    async fn write_playlist(&self, discovered: Option<String>) -> Result<WrittenPlaylist> {
        let stream_url =
            discovered.unwrap_or_else(|| self.config.default_stream_url().to_string());

        let document = PlaylistDocument::build_now(&stream_url);
        let content = document.render();

        tracing::debug!(
            "Writing playlist ({} bytes) to {}",
            content.len(),
            self.config.output_filename()
        );
        let output_path = self
            .storage
            .write_file(self.config.output_filename(), content.as_bytes())
            .await?;

        Ok(WrittenPlaylist {
            output_path,
            document,
        })
    }
}
