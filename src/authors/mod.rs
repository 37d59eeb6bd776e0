//! Author directory
//!
//! A read-only registry mapping author identifiers to display profiles,
//! loaded once from a JSON object keyed by identifier. A registry that
//! cannot be read or parsed degrades to an empty one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::LoadError;

/// Author identifier → profile, in file order
pub type AuthorRegistry = IndexMap<String, Author>;

/// An author profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub bio: String,
    pub avatar: String,
    pub role: String,
    pub company: String,
    pub social: SocialLinks,
}

/// Social network handles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dribbble: Option<String>,
}

/// Lazily loaded, memoized author registry
pub struct AuthorDirectory {
    path: Option<PathBuf>,
    registry: OnceCell<Arc<AuthorRegistry>>,
}

impl AuthorDirectory {
    /// Directory backed by a JSON file, read on first use
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            registry: OnceCell::new(),
        }
    }

    /// Directory over an already loaded registry
    pub fn from_registry(registry: AuthorRegistry) -> Self {
        Self {
            path: None,
            registry: OnceCell::new_with(Some(Arc::new(registry))),
        }
    }

    /// Load the registry on first call; later callers share the result
    pub async fn registry(&self) -> Arc<AuthorRegistry> {
        let registry = self
            .registry
            .get_or_init(|| async {
                let Some(path) = &self.path else {
                    return Arc::new(AuthorRegistry::new());
                };
                match load_registry(path).await {
                    Ok(registry) => {
                        tracing::info!("Loaded {} authors from {:?}", registry.len(), path);
                        Arc::new(registry)
                    }
                    Err(e) => {
                        tracing::error!("Author registry unavailable, continuing without it: {}", e);
                        Arc::new(AuthorRegistry::new())
                    }
                }
            })
            .await;
        Arc::clone(registry)
    }

    /// Look up an author by identifier
    pub async fn resolve(&self, id: &str) -> Option<Author> {
        self.registry().await.get(id).cloned()
    }

    /// Copy of the whole registry
    pub async fn all(&self) -> AuthorRegistry {
        self.registry().await.as_ref().clone()
    }

    /// Full name of the author, or the identifier itself when unknown
    pub async fn display_name(&self, id: &str) -> String {
        let registry = self.registry().await;
        display_name(registry.as_ref(), id)
    }
}

/// Resolve an identifier to a display name, falling back to the identifier
pub fn display_name(registry: &AuthorRegistry, id: &str) -> String {
    registry
        .get(id)
        .map(|author| author.full_name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
        .to_string()
}

/// Read and parse a registry file
pub async fn load_registry(path: &Path) -> Result<AuthorRegistry, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_registry(&content, path)
}

/// Parse registry JSON; `path` is only used in errors
pub fn parse_registry(json: &str, path: &Path) -> Result<AuthorRegistry, LoadError> {
    serde_json::from_str(json).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
