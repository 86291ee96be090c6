//! List published posts

use anyhow::Result;

use crate::config::SiteConfig;
use crate::generator::Generator;
use crate::posts::PostSummary;
use crate::Blog;

/// Walk every listing page and print the posts found
pub async fn run(blog: &Blog) -> Result<()> {
    let generator = Generator::new(blog, blog.client()?)?;
    let state = generator.first_page().await?;
    let state = state.load_all(generator.client(), generator.dates()).await?;

    let posts = state.loaded_summaries();
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("{}", format_line(&blog.config, post));
    }

    Ok(())
}

fn format_line(config: &SiteConfig, post: &PostSummary) -> String {
    format!(
        "  {} - {} [{}]",
        post.publication_date,
        post.title,
        crate::helpers::url_for(config, &crate::helpers::post_path(&post.uid))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let post = PostSummary {
            uid: "como-utilizar-hooks".to_string(),
            publication_date: "15 mar 2021".to_string(),
            title: "Como utilizar Hooks".to_string(),
            subtitle: String::new(),
            author: "Joseph Oliveira".to_string(),
        };
        assert_eq!(
            format_line(&SiteConfig::default(), &post),
            "  15 mar 2021 - Como utilizar Hooks [/post/como-utilizar-hooks/]"
        );
    }
}
