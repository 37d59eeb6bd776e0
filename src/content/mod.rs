//! Content module - handles documents, front matter, articles and rendering

mod article;
mod frontmatter;
mod markdown;
pub mod source;

pub use article::{Article, CategoryInfo, TagInfo};
pub use frontmatter::{ArticleMeta, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use source::{DocumentSource, FsSource, MemorySource};
