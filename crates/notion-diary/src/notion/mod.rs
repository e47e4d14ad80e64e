use std::path::Path;

use crate::prelude::*;
use notion_diary_core::notion::config::{resolve_setting, ConfigFile};

pub mod convert;
pub mod download;
pub mod fetch;

/// Default Notion REST API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Value sent in the `Notion-Version` header
pub const NOTION_VERSION: &str = "2025-09-03";

/// Resolved Notion settings, built once at the CLI boundary
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_id: Option<String>,
}

impl NotionConfig {
    /// Merge flag/environment values with the config file.
    ///
    /// `api_key` and `page_id` already carry the flag and environment tiers
    /// (clap resolves both); the file is the last fallback.
    pub fn resolve(
        base_url: String,
        api_key: Option<String>,
        page_id: Option<String>,
        file: &ConfigFile,
    ) -> Self {
        Self {
            base_url,
            api_key: resolve_setting(api_key, file.api_key.as_deref()),
            page_id: resolve_setting(page_id, file.page_id.as_deref()),
        }
    }
}

/// Read `notion_config.json`. A missing file yields an empty config.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, Error> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config file at {}", path.display());
            return Ok(ConfigFile::default());
        }
        Err(err) => {
            return Err(Error::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                err
            )))
        }
    };

    ConfigFile::parse(&contents).map_err(|e| {
        Error::Configuration(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Create an HTTP client carrying the bearer token and API version headers.
///
/// Fails with [`Error::Configuration`] when no token is available, before any
/// request is attempted.
pub fn create_notion_client(api_key: Option<&str>) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let api_key = api_key.filter(|key| !key.is_empty()).ok_or_else(|| {
        Error::Configuration(
            "Notion API key not found. Set the NOTION_API_KEY environment variable or add it to notion_config.json."
                .to_string(),
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?,
    );
    headers.insert("Notion-Version", HeaderValue::from_static(NOTION_VERSION));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::Request(format!("Failed to build HTTP client: {}", e)))
}
