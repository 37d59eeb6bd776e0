//! Content index
//!
//! Holds every article of the site in memory, together with the category
//! and tag tables derived from them. The index is built exactly once, on the
//! first query: concurrent first callers all await the same build, and no
//! caller ever sees a partially populated index. It is never refreshed.
//!
//! A document that cannot be read or parsed is logged and left out; it never
//! prevents the rest of the content from being indexed.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::authors::{display_name, AuthorDirectory, AuthorRegistry};
use crate::config::{CategorySeed, SiteConfig};
use crate::content::{
    Article, CategoryInfo, DocumentSource, FrontMatter, MarkdownRenderer, TagInfo,
};
use crate::error::{DocumentError, LoadError};
use crate::helpers::normalize_slug;

/// How documents are turned into articles
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Categories listed before any discovered one, with their descriptions
    pub seeds: Vec<CategorySeed>,
    /// Reject documents missing title, author or category
    pub strict: bool,
}

impl IndexOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            seeds: config.categories.clone(),
            strict: config.strict_front_matter,
        }
    }
}

/// Memoized in-memory index of the site content
pub struct ContentIndex {
    source: Arc<dyn DocumentSource>,
    authors: Arc<AuthorDirectory>,
    renderer: Arc<MarkdownRenderer>,
    options: IndexOptions,
    state: OnceCell<IndexState>,
}

#[derive(Debug, Default)]
struct IndexState {
    articles: Vec<Article>,
    categories: IndexMap<String, CategoryInfo>,
    tags: IndexMap<String, TagInfo>,
}

impl ContentIndex {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        authors: Arc<AuthorDirectory>,
        renderer: Arc<MarkdownRenderer>,
        options: IndexOptions,
    ) -> Self {
        Self {
            source,
            authors,
            renderer,
            options,
            state: OnceCell::new(),
        }
    }

    /// Build the index if no caller has yet
    pub async fn ensure_loaded(&self) {
        self.state().await;
    }

    async fn state(&self) -> &IndexState {
        self.state.get_or_init(|| self.build()).await
    }

    async fn build(&self) -> IndexState {
        let start = Instant::now();
        let authors = self.authors.registry().await;
        let source = Arc::clone(&self.source);
        let renderer = Arc::clone(&self.renderer);
        let strict = self.options.strict;

        let articles = match tokio::task::spawn_blocking(move || {
            load_articles(source.as_ref(), renderer.as_ref(), authors.as_ref(), strict)
        })
        .await
        {
            Ok(articles) => articles,
            Err(e) => {
                tracing::error!("{}", LoadError::Task(e.to_string()));
                Vec::new()
            }
        };

        let state = IndexState::derive(articles, &self.options.seeds);
        tracing::info!(
            "Indexed {} articles, {} categories, {} tags in {:.2}s",
            state.articles.len(),
            state.categories.len(),
            state.tags.len(),
            start.elapsed().as_secs_f64()
        );
        state
    }

    /// All articles, in indexing order
    pub async fn get_all(&self) -> Vec<Article> {
        self.state().await.articles.clone()
    }

    /// First article with the given slug
    pub async fn get_by_slug(&self, slug: &str) -> Option<Article> {
        self.state()
            .await
            .articles
            .iter()
            .find(|article| article.slug == slug)
            .cloned()
    }

    /// Articles whose normalized category equals `category_slug`
    pub async fn get_by_category(&self, category_slug: &str) -> Vec<Article> {
        self.state()
            .await
            .articles
            .iter()
            .filter(|article| article.category_slug == category_slug)
            .cloned()
            .collect()
    }

    /// Articles carrying a tag that normalizes to `tag_slug`
    pub async fn get_by_tag(&self, tag_slug: &str) -> Vec<Article> {
        self.state()
            .await
            .articles
            .iter()
            .filter(|article| article.has_tag(tag_slug))
            .cloned()
            .collect()
    }

    /// Case-insensitive search over title, excerpt, tags and content
    ///
    /// A blank query matches nothing.
    pub async fn search(&self, query: &str) -> Vec<Article> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.state()
            .await
            .articles
            .iter()
            .filter(|article| article.matches(&needle))
            .cloned()
            .collect()
    }

    /// Seeded categories first, then discovered ones in first-seen order
    pub async fn get_categories(&self) -> Vec<CategoryInfo> {
        self.state().await.categories.values().cloned().collect()
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Option<CategoryInfo> {
        self.state().await.categories.get(slug).cloned()
    }

    /// Tags in first-seen order
    pub async fn get_tags(&self) -> Vec<TagInfo> {
        self.state().await.tags.values().cloned().collect()
    }
}

impl IndexState {
    fn derive(articles: Vec<Article>, seeds: &[CategorySeed]) -> Self {
        let mut categories: IndexMap<String, CategoryInfo> = IndexMap::new();
        for seed in seeds {
            let slug = normalize_slug(seed.slug.as_deref().unwrap_or(&seed.name));
            if slug.is_empty() {
                tracing::warn!("Ignoring category seed {:?} with an empty slug", seed.name);
                continue;
            }
            let name_slug = normalize_slug(&seed.name);
            if slug != name_slug {
                // Articles are filed by normalized category name, never by seed slug
                tracing::warn!(
                    "Category seed {:?} uses slug {:?}; articles in {:?} are indexed under {:?} instead",
                    seed.name,
                    slug,
                    seed.name,
                    name_slug
                );
            }
            categories
                .entry(slug.clone())
                .or_insert_with(|| CategoryInfo::new(&seed.name, slug, &seed.description));
        }

        let mut tags: IndexMap<String, TagInfo> = IndexMap::new();
        for article in &articles {
            let category_slug = &article.category_slug;
            if !category_slug.is_empty() {
                categories
                    .entry(category_slug.clone())
                    .or_insert_with(|| {
                        CategoryInfo::new(&article.meta.category, category_slug.clone(), "")
                    })
                    .count += 1;
            }

            let mut seen = HashSet::new();
            for tag in &article.meta.tags {
                let slug = normalize_slug(tag);
                if slug.is_empty() || !seen.insert(slug.clone()) {
                    continue;
                }
                tags.entry(slug.clone())
                    .or_insert_with(|| TagInfo {
                        name: tag.clone(),
                        slug,
                        count: 0,
                    })
                    .count += 1;
            }
        }

        Self {
            articles,
            categories,
            tags,
        }
    }
}

/// Read, parse and render every document the source offers
fn load_articles(
    source: &dyn DocumentSource,
    renderer: &MarkdownRenderer,
    authors: &AuthorRegistry,
    strict: bool,
) -> Vec<Article> {
    let locators = match source.locate() {
        Ok(locators) => locators,
        Err(e) => {
            tracing::error!("No documents indexed: {}", e);
            return Vec::new();
        }
    };

    let mut articles = Vec::with_capacity(locators.len());
    let mut slugs = HashSet::new();

    for locator in &locators {
        match load_article(source, locator, renderer, authors, strict) {
            Ok(article) => {
                if !slugs.insert(article.slug.clone()) {
                    tracing::warn!(
                        "Duplicate slug {:?} in {:?}, lookups return the earlier article",
                        article.slug,
                        locator
                    );
                }
                articles.push(article);
            }
            Err(e) => {
                tracing::error!("Skipping document {:?}: {}", locator, e);
            }
        }
    }

    articles
}

/// Load a single article from a document
fn load_article(
    source: &dyn DocumentSource,
    locator: &Path,
    renderer: &MarkdownRenderer,
    authors: &AuthorRegistry,
    strict: bool,
) -> Result<Article, DocumentError> {
    let raw = source.read(locator)?;
    let (fm, body) = FrontMatter::parse(&raw)?;

    let missing = fm.missing_required();
    if !strict && !missing.is_empty() {
        tracing::warn!("Document {:?} has no {}", locator, missing.join(", "));
    }
    let meta = fm.into_meta(strict)?;

    let slug = locator
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();
    let author_name = display_name(authors, &meta.author);
    let content = renderer.render(&body);
    let file_path = locator.to_string_lossy().replace('\\', "/");

    Ok(Article::new(slug, meta, author_name, content, file_path))
}
