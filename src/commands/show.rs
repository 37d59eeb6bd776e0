//! Show a single article

use anyhow::Result;

use crate::helpers::full_url_for;
use crate::Carnet;

/// Print an article's metadata followed by its rendered HTML
pub async fn run(carnet: &Carnet, slug: &str) -> Result<()> {
    let blog = carnet.blog();
    let Some(article) = blog.get_by_slug(slug).await else {
        anyhow::bail!("Article not found: {}", slug);
    };

    println!("{}", article.meta.title);
    println!("  author:   {}", article.author_name);
    println!("  category: {} ({})", article.meta.category, article.category_slug);
    println!("  date:     {}", article.meta.publish_date);
    println!("  read:     {}", article.meta.read_time);
    println!("  tags:     {}", article.meta.tags.join(", "));
    if let Some(url) = article.url() {
        println!("  url:      {}", full_url_for(&carnet.config, &url));
    }
    println!("  source:   {}", article.file_path);
    println!();
    println!("{}", article.content);

    Ok(())
}
