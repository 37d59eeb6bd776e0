//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub authors_file: String,
    pub public_dir: String,

    // Writing
    /// Reject documents whose front matter lacks title, author or category
    pub strict_front_matter: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Pagination
    pub per_page: usize,
    pub tag_per_page: usize,

    // Category
    /// Categories known ahead of time, with their static descriptions
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Carnet".to_string(),

            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            authors_file: "authors/authors.json".to_string(),
            public_dir: "public".to_string(),

            strict_front_matter: false,
            highlight: HighlightConfig::default(),

            per_page: 10,
            tag_per_page: 6,

            categories: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!(
            "Loaded config from {:?} ({} seeded categories)",
            path.as_ref(),
            config.categories.len()
        );
        Ok(config)
    }
}

/// A statically declared category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySeed {
    pub name: String,
    /// Derived from `name` when omitted
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.per_page, 10);
        assert_eq!(config.tag_per_page, 6);
        assert!(!config.strict_front_matter);
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Mon Blog
url: https://blog.example.com
per_page: 20
strict_front_matter: true
highlight:
  enable: true
categories:
  - name: Développement
    description: Tutoriels et conseils sur le développement web
  - name: Sécurité
    slug: securite
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Mon Blog");
        assert_eq!(config.url, "https://blog.example.com");
        assert_eq!(config.per_page, 20);
        assert_eq!(config.tag_per_page, 6);
        assert!(config.strict_front_matter);
        assert!(config.highlight.enable);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].slug, None);
        assert_eq!(config.categories[1].slug.as_deref(), Some("securite"));
        assert_eq!(config.categories[1].description, "");
    }
}
