//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Fetch every post and render the site into the public directory
pub async fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let client = blog.client()?;
    if client.is_preview() {
        tracing::info!("Generating from preview ref");
    }

    let generator = Generator::new(blog, client)?;
    let report = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} listing pages and {} posts in {:.2}s",
        report.listing_pages,
        report.posts,
        duration.as_secs_f64()
    );

    Ok(())
}
