//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::i18n::Language;

/// Environment variable consulted when `api.access_token` is not set
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: Language,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Date format (date-fns tokens)
    pub date_format: String,
    pub unpublished_label: Option<String>,

    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub reading: ReadingConfig,
    #[serde(default)]
    pub comments: CommentsConfig,

    /// UI label overrides, keyed like the built-in label table
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            language: Language::default(),
            timezone: "UTC".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            date_format: "dd MMM yyyy".to_string(),
            unpublished_label: None,

            api: ApiConfig::default(),
            reading: ReadingConfig::default(),
            comments: CommentsConfig::default(),

            labels: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Fill the access token from the environment when the file leaves it out
    pub fn apply_env(&mut self) {
        if self.api.access_token.is_none() {
            if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
                if !token.is_empty() {
                    tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
                    self.api.access_token = Some(token);
                }
            }
        }
    }
}

/// Content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Repository API root, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,
    /// Posts per listing page
    pub page_size: u32,
    /// Content release ref used instead of the master ref
    pub preview_ref: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),
            page_size: 1,
            preview_ref: None,
            request_timeout_secs: None,
        }
    }
}

/// Reading time estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: u32,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
        }
    }
}

/// utterances comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// `owner/name` of the GitHub repository holding the issues
    pub repo: Option<String>,
    pub issue_term: String,
    pub theme: String,
    pub script_src: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            repo: None,
            issue_term: "pathname".to_string(),
            theme: "github-dark".to_string(),
            script_src: "https://utteranc.es/client.js".to_string(),
        }
    }
}
