use regex::Regex;
use std::sync::LazyLock;

const PLAYLIST_MARKER: &str = ".m3u8";

/// How a rule's raw matches become candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Every match already points at a playlist resource.
    Direct,
    /// Assignment values are only kept when they contain `.m3u8`.
    RequireMarker,
}

pub struct ExtractionRule {
    pub pattern: Regex,
    pub policy: MatchPolicy,
}

impl ExtractionRule {
    fn new(pattern: &str, policy: MatchPolicy) -> Self {
        Self {
            pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
            policy,
        }
    }

    /// Capture group 1 when the pattern has one, otherwise the whole match.
    fn raw_matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.captures_iter(text).filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
        })
    }
}

pub static DIRECT_URL_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    [
        r#"https?://[^\s<>"']+\.m3u8[^\s<>"']*"#,
        r#"src\s*=\s*["']([^"']+\.m3u8)["']"#,
        r#"url\s*["']?([^"'\s]+\.m3u8)"#,
        r#"file\s*["']?([^"'\s]+\.m3u8)"#,
    ]
    .into_iter()
    .map(|p| ExtractionRule::new(p, MatchPolicy::Direct))
    .collect()
});

pub static ASSIGNMENT_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    [
        r#"var\s+live_url\s*=\s*["']([^"']+)["']"#,
        r#"var\s+url\s*=\s*["']([^"']+)["']"#,
        r#"source\s*:\s*["']([^"']+)["']"#,
        r#"videoUrl\s*:\s*["']([^"']+)["']"#,
    ]
    .into_iter()
    .map(|p| ExtractionRule::new(p, MatchPolicy::RequireMarker))
    .collect()
});

/// Keeps `http…` as-is, upgrades scheme-relative `//…` to https, drops the rest.
pub fn normalize_candidate(raw: &str) -> Option<String> {
    if raw.starts_with("http") {
        Some(raw.to_string())
    } else if raw.starts_with("//") {
        Some(format!("https:{}", raw))
    } else {
        None
    }
}

pub fn apply_rules(rules: &[ExtractionRule], html: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for rule in rules {
        for raw in rule.raw_matches(html) {
            if rule.policy == MatchPolicy::RequireMarker && !raw.contains(PLAYLIST_MARKER) {
                continue;
            }
            if let Some(url) = normalize_candidate(raw) {
                candidates.push(url);
            }
        }
    }

    candidates
}

/// Scans page text for playlist URLs. Direct-URL rules run before assignment
/// rules; duplicates are kept in scan order.
pub fn extract_m3u8_links(html: &str) -> Vec<String> {
    let mut candidates = apply_rules(&DIRECT_URL_RULES, html);
    candidates.extend(apply_rules(&ASSIGNMENT_RULES, html));

    tracing::debug!("Extracted {} candidate playlist URLs", candidates.len());
    candidates
}
