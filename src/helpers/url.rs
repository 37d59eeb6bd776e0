//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::normalize::normalize_slug;
use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// URL of an article page
///
/// Articles live under their category, so a category that normalizes to
/// nothing has no page.
///
/// # Examples
/// ```ignore
/// article_url("Sécurité", "securite-web-2024") // -> Some("/securite/securite-web-2024")
/// article_url("", "brouillon")                  // -> None
/// ```
pub fn article_url(category_name: &str, article_slug: &str) -> Option<String> {
    let category = normalize_slug(category_name);
    if category.is_empty() {
        return None;
    }
    Some(format!("/{}/{}", category, encode_segment(article_slug)))
}

/// URL of a category listing
pub fn category_url(category_name: &str) -> String {
    format!("/category/{}", normalize_slug(category_name))
}

/// URL of a tag listing
pub fn tag_url(tag_name: &str) -> String {
    format!("/tag/{}", normalize_slug(tag_name))
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about") // -> "https://example.com/about"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
