//! Configuration model for `notion_config.json`
//!
//! Parsing and precedence rules only; reading the file is left to the caller.

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "notion_config.json";
pub const API_KEY_VAR: &str = "NOTION_API_KEY";
pub const PAGE_ID_VAR: &str = "NOTION_PAGE_ID";

/// Contents of the JSON config file. Unknown keys are ignored.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(rename = "NOTION_API_KEY", default)]
    pub api_key: Option<String>,
    #[serde(rename = "NOTION_PAGE_ID", default)]
    pub page_id: Option<String>,
}

impl ConfigFile {
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

/// Pick the first non-empty value, preferring `primary` (flag or environment)
/// over `fallback` (config file).
pub fn resolve_setting(primary: Option<String>, fallback: Option<&str>) -> Option<String> {
    primary
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            fallback
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        })
}
