//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# spacetraveling configuration

# Site
title: spacetraveling
description: ''
language: pt-BR
timezone: America/Sao_Paulo

# URL
url: http://localhost:4000
root: /

# Directory
public_dir: public

# Date format (date-fns tokens)
date_format: dd MMM yyyy

# Content API
api:
  endpoint: https://your-repo.cdn.prismic.io/api/v2
  # access_token may also come from PRISMIC_ACCESS_TOKEN
  document_type: posts
  page_size: 1

# Reading time
reading:
  words_per_minute: 200

# utterances comments
comments:
  # repo: owner/blog-comments
  issue_term: pathname
  theme: github-dark
"#;

/// Initialize a new blog in the given directory
///
/// An existing `_config.yml` is left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("public"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::warn!("{:?} already exists, keeping it", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("blog");
        init_site(&target).unwrap();

        assert!(target.join("public").is_dir());
        let config = SiteConfig::load(target.join("_config.yml")).unwrap();
        assert_eq!(config.title, "spacetraveling");
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.api.page_size, 1);
        assert!(config.comments.repo.is_none());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();
        let content = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(content, "title: Mine\n");
    }
}
