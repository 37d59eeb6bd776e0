//! Article, category and tag models

use serde::{Deserialize, Serialize};

use super::frontmatter::ArticleMeta;
use crate::helpers::{article_url, normalize_slug};

/// A parsed and rendered article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,

    /// Slug (file name without extension)
    pub slug: String,

    /// Front-matter metadata
    #[serde(flatten)]
    pub meta: ArticleMeta,

    /// Author display name, or the raw identifier when it does not resolve
    pub author_name: String,

    /// Normalized category
    pub category_slug: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path (relative to the content directory)
    pub file_path: String,
}

impl Article {
    /// Assemble an article from its parts, deriving the category slug
    pub fn new(
        slug: String,
        meta: ArticleMeta,
        author_name: String,
        content: String,
        file_path: String,
    ) -> Self {
        let category_slug = normalize_slug(&meta.category);
        Self {
            id: slug.clone(),
            slug,
            meta,
            author_name,
            category_slug,
            content,
            file_path,
        }
    }

    /// Site-relative URL of the article page, `None` without a category
    pub fn url(&self) -> Option<String> {
        article_url(&self.meta.category, &self.slug)
    }

    /// Whether any tag normalizes to `tag_slug`
    pub fn has_tag(&self, tag_slug: &str) -> bool {
        self.meta.tags.iter().any(|tag| normalize_slug(tag) == tag_slug)
    }

    /// Case-insensitive substring match over title, excerpt, tags and content
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.meta.title.to_lowercase().contains(needle)
            || self.meta.excerpt.to_lowercase().contains(needle)
            || self
                .meta
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
            || self.content.to_lowercase().contains(needle)
    }
}

/// A category with its article count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub count: usize,
}

impl CategoryInfo {
    pub fn new(name: &str, slug: String, description: &str) -> Self {
        Self {
            name: name.to_string(),
            slug,
            description: description.to_string(),
            count: 0,
        }
    }
}

/// A tag with the number of articles carrying it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub slug: String,
    pub count: usize,
}
