//! Front-matter parsing
//!
//! A document starts with a `---` line, a block of `key: value` lines and a
//! closing `---` line; the markdown body follows. Values are free-form text:
//! the only structured key is `tags`, a comma-separated list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

const DELIMITER: &str = "---";

/// Fields every article is expected to carry
const REQUIRED_FIELDS: [&str; 3] = ["title", "author", "category"];

/// Front-matter data exactly as written, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub read_time: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,

    /// Unrecognized keys, in document order
    pub extra: IndexMap<String, String>,
}

/// Validated article metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub title: String,
    pub excerpt: String,
    /// Author identifier, resolved against the author directory
    pub author: String,
    pub publish_date: String,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, String), FormatError> {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let text = normalized.trim();

        let (opening, mut rest) = split_line(text);
        if opening.trim_end() != DELIMITER {
            return Err(FormatError::MissingFrontMatter);
        }

        let mut fm = FrontMatter::default();
        loop {
            if rest.is_empty() {
                return Err(FormatError::UnterminatedFrontMatter);
            }
            let (line, next) = split_line(rest);
            if line.trim_end() == DELIMITER {
                return Ok((fm, next.to_string()));
            }
            fm.apply_line(line);
            rest = next;
        }
    }

    fn apply_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let value = unquote(value.trim());

        match key {
            "title" => self.title = Some(value.to_string()),
            "excerpt" => self.excerpt = Some(value.to_string()),
            "author" => self.author = Some(value.to_string()),
            "publishDate" => self.publish_date = Some(value.to_string()),
            "readTime" => self.read_time = Some(value.to_string()),
            "category" => self.category = Some(value.to_string()),
            "tags" => self.tags = Some(split_tags(value)),
            "image" => self.image = Some(value.to_string()),
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Required fields that are absent or blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let values = [&self.title, &self.author, &self.category];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Convert into article metadata
    ///
    /// Lenient mode fills absent fields with empty values. Strict mode
    /// rejects a record missing any of title, author or category.
    pub fn into_meta(self, strict: bool) -> Result<ArticleMeta, FormatError> {
        if strict {
            if let Some(&field) = self.missing_required().first() {
                return Err(FormatError::MissingField(field));
            }
        }

        Ok(ArticleMeta {
            title: self.title.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            publish_date: self.publish_date.unwrap_or_default(),
            read_time: self.read_time.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            image: self.image.filter(|image| !image.is_empty()),
        })
    }
}

/// Split off the first line, without its newline
fn split_line(text: &str) -> (&str, &str) {
    text.split_once('\n').unwrap_or((text, ""))
}

/// Strip one leading and one trailing quote character
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"---
title: Les tendances du développement web en 2024
excerpt: Découvrez les technologies et frameworks qui façonnent l'avenir du développement web.
author: marie-dubois
publishDate: 15 Mai 2024
readTime: 5 min
category: Développement
tags: React, TypeScript, Performance
---

# L'évolution constante du développement web

Le monde du développement web ne cesse d'évoluer.
"#;

    #[test]
    fn test_parse_front_matter() {
        let (fm, body) = FrontMatter::parse(ARTICLE).unwrap();
        assert_eq!(
            fm.title.as_deref(),
            Some("Les tendances du développement web en 2024")
        );
        assert_eq!(fm.author.as_deref(), Some("marie-dubois"));
        assert_eq!(fm.publish_date.as_deref(), Some("15 Mai 2024"));
        assert_eq!(fm.read_time.as_deref(), Some("5 min"));
        assert_eq!(fm.category.as_deref(), Some("Développement"));
        assert_eq!(fm.image, None);
        assert!(body.starts_with("\n# L'évolution constante"));
        assert!(body.ends_with("ne cesse d'évoluer."));
    }

    #[test]
    fn test_tags_are_trimmed_and_ordered() {
        let (fm, _) = FrontMatter::parse(ARTICLE).unwrap();
        assert_eq!(
            fm.tags,
            Some(vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "Performance".to_string()
            ])
        );
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let content = "---\ntitle: API REST vs GraphQL : quel choix faire ?\nimage: https://cdn.example.com/a.png\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.title.as_deref(),
            Some("API REST vs GraphQL : quel choix faire ?")
        );
        assert_eq!(fm.image.as_deref(), Some("https://cdn.example.com/a.png"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_quotes_are_stripped_once() {
        let content = "---\ntitle: \"Design System : créer une cohérence visuelle\"\nexcerpt: 'Un \"vrai\" guide'\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(
            fm.title.as_deref(),
            Some("Design System : créer une cohérence visuelle")
        );
        assert_eq!(fm.excerpt.as_deref(), Some("Un \"vrai\" guide"));
    }

    #[test]
    fn test_missing_front_matter() {
        let err = FrontMatter::parse("# Just a heading\n\nSome text.").unwrap_err();
        assert_eq!(err, FormatError::MissingFrontMatter);
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = FrontMatter::parse("---\ntitle: Never closed\n\nBody").unwrap_err();
        assert_eq!(err, FormatError::UnterminatedFrontMatter);
    }

    #[test]
    fn test_crlf_and_leading_whitespace() {
        let content = "\r\n  ---\r\ntitle: Windows\r\ntags: a, b\r\n---\r\nBody line\r\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(body, "Body line");
    }

    #[test]
    fn test_unknown_keys_and_junk_lines() {
        let content = "---\ntitle: T\nlayout: wide\nno colon here\n: orphan value\nseries: Rust\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.extra.len(), 2);
        assert_eq!(fm.extra.get("layout").map(String::as_str), Some("wide"));
        let keys: Vec<_> = fm.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["layout", "series"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = FrontMatter::parse(ARTICLE).unwrap();
        let second = FrontMatter::parse(ARTICLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lenient_meta_fills_defaults() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Seul\n---\n").unwrap();
        assert_eq!(fm.missing_required(), vec!["author", "category"]);
        let meta = fm.into_meta(false).unwrap();
        assert_eq!(meta.title, "Seul");
        assert_eq!(meta.author, "");
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_strict_meta_rejects_missing_fields() {
        let (fm, _) = FrontMatter::parse("---\ntitle: Seul\ncategory: Design\n---\n").unwrap();
        assert_eq!(
            fm.into_meta(true).unwrap_err(),
            FormatError::MissingField("author")
        );
    }

    #[test]
    fn test_strict_meta_accepts_complete_record() {
        let (fm, _) = FrontMatter::parse(ARTICLE).unwrap();
        let meta = fm.into_meta(true).unwrap();
        assert_eq!(meta.category, "Développement");
        assert_eq!(meta.tags.len(), 3);
    }
}
