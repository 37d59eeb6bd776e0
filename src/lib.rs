//! carnet: content pipeline for a markdown blog
//!
//! This crate turns a directory of markdown documents with front matter into
//! an in-memory, queryable index of rendered articles, categories and tags,
//! and serves it through a CLI, a JSON API and a sitemap.

pub mod authors;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod index;
pub mod query;
pub mod server;
pub mod sitemap;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::authors::AuthorDirectory;
use crate::content::{FsSource, MarkdownRenderer};
use crate::index::{ContentIndex, IndexOptions};
use crate::query::Blog;

/// The main Carnet application
#[derive(Clone)]
pub struct Carnet {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Author registry file
    pub authors_path: std::path::PathBuf,
}

impl Carnet {
    /// Create a new Carnet instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let authors_path = base_dir.join(&config.authors_file);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            authors_path,
        })
    }

    /// Wire the query service over the content directory and author registry
    ///
    /// Nothing is read until the first query.
    pub fn blog(&self) -> Blog {
        let authors = Arc::new(AuthorDirectory::new(&self.authors_path));
        let renderer = Arc::new(MarkdownRenderer::from_config(&self.config.highlight));
        let index = ContentIndex::new(
            Arc::new(FsSource::new(&self.content_dir)),
            Arc::clone(&authors),
            renderer,
            IndexOptions::from_config(&self.config),
        );
        Blog::new(index, authors, self.config.per_page)
    }
}
