use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ScrapeError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::HttpError(e) if e.is_timeout() => "網路請求逾時".to_string(),
            ScrapeError::HttpError(_) => "網路請求失敗".to_string(),
            ScrapeError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            ScrapeError::ConfigParseError { message } => format!("配置檔格式錯誤: {}", message),
            ScrapeError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置值無效 ({}): {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::HttpError(_) => "Check network connectivity and the target URL",
            ScrapeError::IoError(_) => "Check that the file path exists and is writable",
            ScrapeError::ConfigParseError { .. } => "Make sure the config file is valid TOML",
            ScrapeError::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
