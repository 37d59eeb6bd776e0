//! List site content

use anyhow::Result;

use crate::config::SiteConfig;
use crate::Carnet;

/// Listing header, e.g. `Mon Blog - Articles (12):`
fn heading(config: &SiteConfig, label: &str, count: usize) -> String {
    format!("{} - {} ({}):", config.title, label, count)
}

/// List site content by type
pub async fn run(carnet: &Carnet, content_type: &str) -> Result<()> {
    let blog = carnet.blog();

    match content_type {
        "article" | "articles" | "post" | "posts" => {
            let articles = blog.get_all().await;
            println!("{}", heading(&carnet.config, "Articles", articles.len()));
            for article in articles {
                println!(
                    "  {} - {} [{}]",
                    article.meta.publish_date, article.meta.title, article.file_path
                );
            }
        }
        "category" | "categories" => {
            let categories = blog.get_categories().await;
            println!("{}", heading(&carnet.config, "Categories", categories.len()));
            for category in categories {
                println!("  {} /{} ({})", category.name, category.slug, category.count);
            }
        }
        "tag" | "tags" => {
            let mut tags = blog.get_tags().await;
            println!("{}", heading(&carnet.config, "Tags", tags.len()));
            tags.sort_by(|a, b| b.count.cmp(&a.count));
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        "author" | "authors" => {
            let authors = blog.get_authors().await;
            println!("{}", heading(&carnet.config, "Authors", authors.len()));
            for (id, author) in authors {
                if author.role.is_empty() {
                    println!("  {} [{}]", author.full_name, id);
                } else {
                    println!("  {} - {} [{}]", author.full_name, author.role, id);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: articles, categories, tags, authors",
                content_type
            );
        }
    }

    Ok(())
}
