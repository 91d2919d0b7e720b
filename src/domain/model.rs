use std::fmt;

/// One `#EXTINF` + URL pair of an extended M3U playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    pub tvg_id: String,
    pub tvg_name: String,
    pub tvg_logo: String,
    pub group_title: String,
    pub display_name: String,
    pub url: String,
}

impl ChannelEntry {
    pub fn extinf_line(&self) -> String {
        format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}",
            self.tvg_id, self.tvg_name, self.tvg_logo, self.group_title, self.display_name
        )
    }
}

/// Where the stream URL of the primary entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    Page,
    Fallback,
    Default,
}

impl fmt::Display for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlSource::Page => write!(f, "page"),
            UrlSource::Fallback => write!(f, "fallback"),
            UrlSource::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistDocument {
    pub generated_at: String,
    pub source_url: String,
    pub entries: Vec<ChannelEntry>,
}

#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub output_path: String,
    pub stream_url: String,
    pub source: UrlSource,
    pub candidates_found: usize,
}

#[derive(Debug, Clone)]
pub struct WrittenPlaylist {
    pub output_path: String,
    pub document: PlaylistDocument,
}
