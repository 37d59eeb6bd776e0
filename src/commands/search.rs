//! Search articles

use anyhow::Result;

use crate::helpers::{strip_html, truncate};
use crate::Carnet;

/// Print the articles matching `query`
pub async fn run(carnet: &Carnet, query: &str) -> Result<()> {
    let blog = carnet.blog();
    let results = blog.search(query).await;

    println!("Results for {:?} ({}):", query.trim(), results.len());
    for article in results {
        let summary = if article.meta.excerpt.is_empty() {
            truncate(strip_html(&article.content).trim(), 80, None)
        } else {
            article.meta.excerpt.clone()
        };
        match article.url() {
            Some(url) => println!("  {} [{}]", article.meta.title, url),
            None => println!("  {} [{}]", article.meta.title, article.file_path),
        }
        if !summary.is_empty() {
            println!("    {}", summary);
        }
    }

    Ok(())
}
