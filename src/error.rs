use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VanilliError {
    /// 构建 stub 时参数不合法（发生在任何网络调用之前）
    #[error("{0}")]
    Validation(String),

    /// 管理接口返回非 2xx，或者网络层失败
    #[error("transport error{}: {detail}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Transport { status: Option<u16>, detail: String },

    #[error("VERIFICATION FAILED: {0}")]
    Verification(String),

    #[error("vanilli did not become live on port {port} within {}ms", .waited.as_millis())]
    StartupTimeout { port: u16, waited: Duration },

    #[error("vanilli exited during startup: {0}")]
    ServerExited(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl VanilliError {
    pub fn validation(message: impl Into<String>) -> Self {
        VanilliError::Validation(message.into())
    }
}

impl From<reqwest::Error> for VanilliError {
    fn from(err: reqwest::Error) -> Self {
        VanilliError::Transport {
            status: err.status().map(|s| s.as_u16()),
            detail: err.to_string(),
        }
    }
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for VanilliError {
    fn from(err: anyhow::Error) -> Self {
        VanilliError::Other(err.to_string())
    }
}

/// Result type for vanilli crate
pub type Result<T> = std::result::Result<T, VanilliError>;
