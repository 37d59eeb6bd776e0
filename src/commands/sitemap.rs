//! Write the sitemap

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::sitemap;
use crate::Carnet;

/// Write `sitemap.xml` to `output`, or into the public directory
pub async fn run(carnet: &Carnet, output: Option<&Path>) -> Result<()> {
    let blog = carnet.blog();
    let today = chrono::Local::now().date_naive();
    let xml = sitemap::generate(&blog, &carnet.config, today).await;

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            fs::create_dir_all(&carnet.public_dir)?;
            carnet.public_dir.join("sitemap.xml")
        }
    };
    fs::write(&output_path, xml)?;
    tracing::info!("Generated {:?}", output_path);

    Ok(())
}
