use pos_client::{ClientConfig, DEFAULT_BASE_URL};
use pos_printer::PaperWidth;
use std::time::Duration;

/// POS configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | POS_API_URL | http://localhost:3000/api/v1 | Back-office API root |
/// | POS_API_TOKEN | - | Bearer token |
/// | POS_REQUEST_TIMEOUT_MS | 30000 | HTTP request timeout (ms) |
/// | POS_LOG_LEVEL | info | Log level |
/// | POS_LOG_JSON | false | JSON log lines |
/// | POS_LOG_DIR | - | Directory for rolling log files |
/// | POS_PRINTER_ADDR | - | Thermal printer `host:port` |
/// | POS_PAPER_WIDTH | 48 | Ticket columns (48 = 80 mm, 32 = 58 mm) |
/// | POS_HISTORY_PAGE_SIZE | 10 | Cancelled-documents page size |
///
/// # Example
///
/// ```ignore
/// POS_API_URL=https://erp.example.do/api/v1 POS_LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct PosConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub printer_addr: Option<String>,
    pub paper_width: PaperWidth,
    pub history_page_size: u32,
}

impl PosConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_url: non_empty("POS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            api_token: non_empty("POS_API_TOKEN"),
            request_timeout_ms: lookup("POS_REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            log_level: non_empty("POS_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("POS_LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty("POS_LOG_DIR"),
            printer_addr: non_empty("POS_PRINTER_ADDR"),
            paper_width: lookup("POS_PAPER_WIDTH")
                .and_then(|v| v.parse().ok())
                .and_then(PaperWidth::from_columns)
                .unwrap_or_default(),
            history_page_size: lookup("POS_HISTORY_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(10),
        }
    }

    /// HTTP client configuration for the back office
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone())
            .with_timeout(Duration::from_millis(self.request_timeout_ms));
        match &self.api_token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
