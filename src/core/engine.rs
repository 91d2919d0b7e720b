use crate::core::{Pipeline, ScrapeReport, UrlSource};
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs fetch → extract → probe → write once. Only the write can fail.
    pub async fn run(&self) -> Result<ScrapeReport> {
        println!("开始获取河北电视台直播源...");

        let html = match self.pipeline.fetch_page().await {
            Ok(html) if !html.is_empty() => {
                println!("网页获取成功，正在分析...");
                Some(html)
            }
            Ok(_) => {
                tracing::warn!("Page fetched but body is empty");
                None
            }
            Err(e) => {
                tracing::warn!("Page fetch failed: {}", e);
                println!("获取网页失败: {}", e);
                None
            }
        };

        let candidates = html
            .as_deref()
            .map(|html| self.pipeline.extract_links(html))
            .unwrap_or_default();
        let candidates_found = candidates.len();

        let mut source = UrlSource::Default;
        let mut discovered = candidates.into_iter().next();

        if let Some(url) = &discovered {
            source = UrlSource::Page;
            println!("找到m3u8链接: {}", url);
        } else if html.is_some() {
            println!("在网页中未找到m3u8链接");
        }

        if discovered.is_none() {
            println!("正在尝试常见地址...");
            discovered = self.pipeline.probe_fallbacks().await;
            if let Some(url) = &discovered {
                source = UrlSource::Fallback;
                println!("通过常见地址找到: {}", url);
            } else {
                tracing::info!("No fallback candidate reachable, using default playlist URL");
            }
        }

        let written = self.pipeline.write_playlist(discovered).await?;
        println!("M3U8文件已保存: {}", written.output_path);

        Ok(ScrapeReport {
            output_path: written.output_path,
            stream_url: written.document.source_url,
            source,
            candidates_found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlaylistDocument, WrittenPlaylist};
    use crate::utils::error::ScrapeError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipeline {
        page: Option<&'static str>,
        fallback: Option<&'static str>,
        extract_calls: AtomicUsize,
        probe_calls: AtomicUsize,
    }

    impl StubPipeline {
        fn new(page: Option<&'static str>, fallback: Option<&'static str>) -> Self {
            Self {
                page,
                fallback,
                extract_calls: AtomicUsize::new(0),
                probe_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn fetch_page(&self) -> Result<String> {
            self.page.map(str::to_string).ok_or_else(|| {
                ScrapeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))
            })
        }

        fn extract_links(&self, html: &str) -> Vec<String> {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            crate::core::extractor::extract_m3u8_links(html)
        }

        async fn probe_fallbacks(&self) -> Option<String> {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            self.fallback.map(str::to_string)
        }

        async fn write_playlist(&self, discovered: Option<String>) -> Result<WrittenPlaylist> {
            let url = discovered.unwrap_or_else(|| "https://default.example.com/global.m3u".into());
            Ok(WrittenPlaylist {
                output_path: "stub/hebtv.m3u8".to_string(),
                document: PlaylistDocument::build(&url, "2024-01-01 08:00:00".into()),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_page_is_treated_as_no_page() {
        let engine = ScrapeEngine::new(StubPipeline::new(Some(""), None));

        let report = engine.run().await.unwrap();

        assert_eq!(engine.pipeline.extract_calls.load(Ordering::SeqCst), 0);
        assert_eq!(engine.pipeline.probe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.source, UrlSource::Default);
        assert_eq!(report.stream_url, "https://default.example.com/global.m3u");
    }

    #[tokio::test]
    async fn test_page_link_skips_fallback_probe() {
        let page = r#"<video src="//cdn.example.com/tv.m3u8"></video>"#;
        let engine = ScrapeEngine::new(StubPipeline::new(Some(page), Some("https://unused/")));

        let report = engine.run().await.unwrap();

        assert_eq!(engine.pipeline.probe_calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.source, UrlSource::Page);
        assert_eq!(report.candidates_found, 1);
        assert_eq!(report.stream_url, "https://cdn.example.com/tv.m3u8");
    }

    #[tokio::test]
    async fn test_fetch_failure_uses_fallback() {
        let engine = ScrapeEngine::new(StubPipeline::new(
            None,
            Some("https://live.example.com/tvchannel1.m3u8"),
        ));

        let report = engine.run().await.unwrap();

        assert_eq!(engine.pipeline.extract_calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.source, UrlSource::Fallback);
        assert_eq!(report.stream_url, "https://live.example.com/tvchannel1.m3u8");
    }
}
