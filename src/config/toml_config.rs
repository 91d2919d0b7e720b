use crate::core::extractor::normalize_candidate;
use crate::core::playlist::DEFAULT_STREAM_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const TARGET_URL: &str = "https://www.hebtv.com/19/19js/st/xdszb/index.shtml?index=0";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";
pub const REFERER: &str = "https://www.hebtv.com/";

pub const FALLBACK_CANDIDATES: [&str; 4] = [
    "https://live.hebtv.com/live/tvchannel1.m3u8",
    "http://live.hebtv.com/live/tvchannel1.m3u8",
    "https://stream.hebtv.com/live/tvchannel1.m3u8",
    "http://weblive.hebtv.com/live/tvchannel1.m3u8",
];

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub source: SourceConfig,
    pub fallback: FallbackConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub target_url: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub referer: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            target_url: TARGET_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            referer: REFERER.to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub candidates: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            candidates: FALLBACK_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            timeout_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub filename: String,
    pub default_url: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            filename: "hebtv.m3u8".to_string(),
            default_url: DEFAULT_STREAM_URL.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScrapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未填的欄位使用內建預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigParseError {
            message: e.to_string(),
        })
    }

    /// 替換環境變數 (例如 ${HEBTV_TARGET_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_path(&self) -> &str {
        &self.output.output_path
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.target_url", &self.source.target_url)?;
        validation::validate_url("source.referer", &self.source.referer)?;
        validation::validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;

        for candidate in &self.fallback.candidates {
            validation::validate_url("fallback.candidates", candidate)?;
        }
        validation::validate_positive_number(
            "fallback.timeout_seconds",
            self.fallback.timeout_seconds,
            1,
        )?;

        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_file_name("output.filename", &self.output.filename)?;

        // 預設地址與頁面擷取結果走同一套正規化規則
        if normalize_candidate(&self.output.default_url).is_none() {
            return Err(ScrapeError::InvalidConfigValueError {
                field: "output.default_url".to_string(),
                value: self.output.default_url.clone(),
                reason: "Must start with http or //".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ScrapeConfig {
    fn target_url(&self) -> &str {
        &self.source.target_url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn accept(&self) -> &str {
        &self.source.accept
    }

    fn accept_language(&self) -> &str {
        &self.source.accept_language
    }

    fn referer(&self) -> &str {
        &self.source.referer
    }

    fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn fallback_candidates(&self) -> &[String] {
        &self.fallback.candidates
    }

    fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback.timeout_seconds)
    }

    fn output_filename(&self) -> &str {
        &self.output.filename
    }

    fn default_stream_url(&self) -> &str {
        &self.output.default_url
    }
}

impl Validate for ScrapeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_builtin_defaults() {
        let config = ScrapeConfig::from_toml_str("").unwrap();

        assert_eq!(config.target_url(), TARGET_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.probe_timeout(), Duration::from_secs(5));
        assert_eq!(config.fallback_candidates().len(), 4);
        assert_eq!(config.fallback_candidates()[0], FALLBACK_CANDIDATES[0]);
        assert_eq!(config.output_filename(), "hebtv.m3u8");
        assert_eq!(config.default_stream_url(), DEFAULT_STREAM_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let toml_content = r#"
[source]
target_url = "https://tv.example.com/live"
timeout_seconds = 3

[output]
output_path = "./playlists"
"#;

        let config = ScrapeConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.target_url(), "https://tv.example.com/live");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
        assert_eq!(config.referer(), REFERER);
        assert_eq!(config.output_path(), "./playlists");
        assert_eq!(config.output_filename(), "hebtv.m3u8");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HEBTV_TEST_TARGET_URL", "https://env.example.com/page");

        let toml_content = r#"
[source]
target_url = "${HEBTV_TEST_TARGET_URL}"
"#;

        let config = ScrapeConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.target_url(), "https://env.example.com/page");

        std::env::remove_var("HEBTV_TEST_TARGET_URL");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let bad_url = ScrapeConfig::from_toml_str("[source]\ntarget_url = \"not-a-url\"").unwrap();
        assert!(bad_url.validate().is_err());

        let zero_timeout = ScrapeConfig::from_toml_str("[fallback]\ntimeout_seconds = 0").unwrap();
        assert!(zero_timeout.validate().is_err());

        let bad_candidate =
            ScrapeConfig::from_toml_str("[fallback]\ncandidates = [\"ftp://live.example.com/x.m3u8\"]")
                .unwrap();
        assert!(bad_candidate.validate().is_err());

        let bad_default = ScrapeConfig::from_toml_str("[output]\ndefault_url = \"global.m3u\"").unwrap();
        assert!(bad_default.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = ScrapeConfig::from_toml_str("[source\ntarget_url = 1").unwrap_err();
        assert!(matches!(err, ScrapeError::ConfigParseError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nfilename = \"custom.m3u8\"\n")
            .unwrap();

        let config = ScrapeConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_filename(), "custom.m3u8");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScrapeConfig::from_file("/nonexistent/hebtv-live.toml").unwrap_err();
        assert!(matches!(err, ScrapeError::IoError(_)));
    }
}
