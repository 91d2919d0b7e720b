use crate::domain::model::{ChannelEntry, PlaylistDocument};

pub const DEFAULT_STREAM_URL: &str = "https://live.fanmingming.com/tv/m3u/global.m3u";
pub const PLAYLIST_TITLE: &str = "河北电视台直播源";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn entry(
    tvg_id: &str,
    tvg_name: &str,
    tvg_logo: &str,
    group_title: &str,
    display_name: &str,
    url: &str,
) -> ChannelEntry {
    ChannelEntry {
        tvg_id: tvg_id.to_string(),
        tvg_name: tvg_name.to_string(),
        tvg_logo: tvg_logo.to_string(),
        group_title: group_title.to_string(),
        display_name: display_name.to_string(),
        url: url.to_string(),
    }
}

pub fn hebtv_entry(url: &str) -> ChannelEntry {
    entry(
        "hebtv1",
        "河北卫视",
        "https://example.com/hebtv.png",
        "河北",
        "河北卫视",
        url,
    )
}

/// Constant CCTV entries appended after the Hebei channel on every run.
pub fn fixed_entries() -> [ChannelEntry; 2] {
    [
        entry(
            "cctv1",
            "CCTV-1",
            "https://example.com/cctv1.png",
            "央视",
            "CCTV-1综合",
            "https://cctvcnch5c.v.wscdns.com/live/cctv1_2/index.m3u8",
        ),
        entry(
            "cctv5",
            "CCTV-5",
            "https://example.com/cctv5.png",
            "央视",
            "CCTV-5体育",
            "https://cctvcnch5c.v.wscdns.com/live/cctv5_2/index.m3u8",
        ),
    ]
}

impl PlaylistDocument {
    pub fn build(stream_url: &str, generated_at: String) -> Self {
        let mut entries = vec![hebtv_entry(stream_url)];
        entries.extend(fixed_entries());

        Self {
            generated_at,
            source_url: stream_url.to_string(),
            entries,
        }
    }

    pub fn build_now(stream_url: &str) -> Self {
        let generated_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::build(stream_url, generated_at)
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            "#EXTM3U".to_string(),
            format!("# {}", PLAYLIST_TITLE),
            format!("# 更新时间：{}", self.generated_at),
            format!("# 源地址：{}", self.source_url),
        ];

        for entry in &self.entries {
            lines.push(String::new());
            lines.push(entry.extinf_line());
            lines.push(entry.url.clone());
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
