use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Scraping error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Browser(_) => "browser",
            AppError::Scraper(_) => "scraper",
            AppError::Export(_) => "export",
            AppError::Io(_) => "io",
            AppError::Serde(_) => "serde",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required configuration: {0}")]
    MissingField(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("No page snapshots found matching {0}")]
    NoSnapshots(String),

    #[error("Invalid snapshot pattern: {0}")]
    Pattern(String),

    #[error("No element matches {0}")]
    ElementNotFound(String),
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    #[error("Selector error: {0}")]
    SelectorError(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write table row: {0}")]
    Write(String),

    #[error("Table is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
