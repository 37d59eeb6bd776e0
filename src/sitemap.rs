//! Sitemap generation
//!
//! Lists the static pages, every category, article and tag of the site in
//! the sitemaps.org 0.9 format.

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::helpers::{category_url, full_url_for, tag_url};
use crate::query::Blog;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry
struct UrlEntry {
    loc: String,
    changefreq: &'static str,
    priority: &'static str,
}

impl UrlEntry {
    fn new(config: &SiteConfig, path: &str, changefreq: &'static str, priority: &'static str) -> Self {
        Self {
            loc: full_url_for(config, path),
            changefreq,
            priority,
        }
    }
}

/// Build the sitemap XML, stamping every entry with `today`
pub async fn generate(blog: &Blog, config: &SiteConfig, today: NaiveDate) -> String {
    let mut urls = vec![
        UrlEntry::new(config, "/", "daily", "1.0"),
        UrlEntry::new(config, "/about", "monthly", "0.8"),
        UrlEntry::new(config, "/search", "weekly", "0.7"),
    ];

    for category in blog.get_categories().await {
        urls.push(UrlEntry::new(config, &category_url(&category.slug), "weekly", "0.8"));
    }
    for article in blog.get_all().await {
        // Uncategorized articles have no page
        if let Some(url) = article.url() {
            urls.push(UrlEntry::new(config, &url, "monthly", "0.9"));
        }
    }
    for tag in blog.get_tags().await {
        urls.push(UrlEntry::new(config, &tag_url(&tag.slug), "weekly", "0.6"));
    }

    let lastmod = today.format("%Y-%m-%d").to_string();
    let mut xml = String::with_capacity(256 * urls.len());
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));
    for url in &urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", url.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", url.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");

    tracing::debug!("Sitemap lists {} URLs", urls.len());
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
