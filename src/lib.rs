//! spacetraveling: a static blog generator for headless CMS content
//!
//! Posts are fetched from a Prismic-style content API and rendered with
//! embedded Tera templates: a "load more" listing built by walking the API's
//! pagination cursor, and one page per post with reading time, previous/next
//! navigation and an utterances comment widget.

pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod posts;
pub mod server;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentClient, PrismicClient};

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Run every query against a content release instead of published content
    pub fn with_preview_ref(mut self, preview_ref: Option<String>) -> Self {
        if preview_ref.is_some() {
            self.config.api.preview_ref = preview_ref;
        }
        self
    }

    /// Build the content API client described by the configuration
    pub fn client(&self) -> Result<Arc<dyn ContentClient>> {
        if self.config.api.endpoint.is_empty() {
            anyhow::bail!("api.endpoint is not set in _config.yml");
        }
        Ok(Arc::new(PrismicClient::new(&self.config.api)?))
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
