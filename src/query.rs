//! Query layer
//!
//! [`Blog`] is the read-only service handed to the CLI commands and the HTTP
//! handlers. It forwards to the content index and the author directory, both
//! of which load themselves on first use.

use std::sync::Arc;

use crate::authors::{Author, AuthorDirectory, AuthorRegistry};
use crate::content::{Article, CategoryInfo, TagInfo};
use crate::helpers::{paginate, Paginated};
use crate::index::ContentIndex;

/// Read operations over the site content
pub struct Blog {
    index: ContentIndex,
    authors: Arc<AuthorDirectory>,
    per_page: usize,
}

impl Blog {
    pub fn new(index: ContentIndex, authors: Arc<AuthorDirectory>, per_page: usize) -> Self {
        Self {
            index,
            authors,
            per_page,
        }
    }

    /// Default page size for listings
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Load authors and content now rather than on the first query
    pub async fn warm_up(&self) {
        self.authors.registry().await;
        self.index.ensure_loaded().await;
    }

    pub async fn get_all(&self) -> Vec<Article> {
        self.index.get_all().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<Article> {
        self.index.get_by_slug(slug).await
    }

    pub async fn get_by_category(&self, category_slug: &str) -> Vec<Article> {
        self.index.get_by_category(category_slug).await
    }

    pub async fn get_by_tag(&self, tag_slug: &str) -> Vec<Article> {
        self.index.get_by_tag(tag_slug).await
    }

    pub async fn search(&self, query: &str) -> Vec<Article> {
        self.index.search(query).await
    }

    pub async fn get_categories(&self) -> Vec<CategoryInfo> {
        self.index.get_categories().await
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Option<CategoryInfo> {
        self.index.get_category_by_slug(slug).await
    }

    pub async fn get_tags(&self) -> Vec<TagInfo> {
        self.index.get_tags().await
    }

    pub async fn get_author(&self, id: &str) -> Option<Author> {
        self.authors.resolve(id).await
    }

    pub async fn get_authors(&self) -> AuthorRegistry {
        self.authors.all().await
    }

    /// One page of `items`, `per_page` falling back to the configured size
    pub fn paginate<T: Clone>(
        &self,
        items: &[T],
        page: usize,
        per_page: Option<usize>,
    ) -> Paginated<T> {
        paginate(items, page, per_page.unwrap_or(self.per_page))
    }
}
