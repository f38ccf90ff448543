use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
}

/// How the controller decides that a freshly navigated page has rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitStrategy {
    /// Poll for a changed record area with exponential backoff.
    Poll,
    /// Sleep for the settle interval and assume the page is ready.
    Fixed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_wait_strategy")]
    pub wait_strategy: WaitStrategy,
    #[serde(default = "default_settle_interval_ms")]
    pub settle_interval_ms: u64,
    #[serde(default = "default_poll_initial_ms")]
    pub poll_initial_ms: u64,
    #[serde(default = "default_poll_max_ms")]
    pub poll_max_ms: u64,
    #[serde(default = "default_ready_timeout_ms")]
    pub ready_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub write_json: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

// Default implementations
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            file_pattern: default_file_pattern(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            wait_strategy: default_wait_strategy(),
            settle_interval_ms: default_settle_interval_ms(),
            poll_initial_ms: default_poll_initial_ms(),
            poll_max_ms: default_poll_max_ms(),
            ready_timeout_ms: default_ready_timeout_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            write_json: false,
        }
    }
}

impl PaginationConfig {
    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    pub fn poll_initial(&self) -> Duration {
        Duration::from_millis(self.poll_initial_ms)
    }

    pub fn poll_max(&self) -> Duration {
        Duration::from_millis(self.poll_max_ms)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        Self::from_toml(&content)
    }

    /// Like [`Config::from_file`], but a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.validate()?;
            return Ok(config);
        }
        Self::from_file(path)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.browser.snapshot_dir.is_empty() {
            return Err(ConfigError::MissingField("browser.snapshot_dir".to_string()).into());
        }

        if self.browser.file_pattern.is_empty() {
            return Err(ConfigError::MissingField("browser.file_pattern".to_string()).into());
        }

        if self.export.output_dir.is_empty() {
            return Err(ConfigError::MissingField("export.output_dir".to_string()).into());
        }

        let pagination = &self.pagination;
        for (name, value) in [
            ("settle_interval_ms", pagination.settle_interval_ms),
            ("poll_initial_ms", pagination.poll_initial_ms),
            ("poll_max_ms", pagination.poll_max_ms),
            ("ready_timeout_ms", pagination.ready_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "pagination.{} must be greater than 0",
                    name
                ))
                .into());
            }
        }

        if pagination.poll_initial_ms > pagination.poll_max_ms {
            return Err(ConfigError::InvalidValue(format!(
                "pagination.poll_initial_ms ({}) exceeds poll_max_ms ({})",
                pagination.poll_initial_ms, pagination.poll_max_ms
            ))
            .into());
        }

        Ok(())
    }
}

fn default_snapshot_dir() -> String {
    "local_html".to_string()
}

fn default_file_pattern() -> String {
    "page-*.html".to_string()
}

fn default_wait_strategy() -> WaitStrategy {
    WaitStrategy::Poll
}

fn default_settle_interval_ms() -> u64 {
    3000
}

fn default_poll_initial_ms() -> u64 {
    100
}

fn default_poll_max_ms() -> u64 {
    1600
}

fn default_ready_timeout_ms() -> u64 {
    10_000
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "scraper.log".to_string()
}
