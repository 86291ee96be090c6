//! Generator module - renders the listing and post pages to static HTML

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tera::Context;

use crate::comments::{CommentAnchor, CommentWidgetLoader};
use crate::content::{ContentClient, Predicate, Query};
use crate::helpers::{css, full_url_for, listing_path, meta_generator, post_path, url_for};
use crate::i18n::I18n;
use crate::posts::{resolve_adjacent, DateFormatter, PaginationState, PostDetail, PostSummary};
use crate::templates::{
    BlockData, ConfigData, NavPost, PostCardData, TemplateRenderer, STYLESHEET,
};
use crate::Blog;

/// What a full build produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateReport {
    pub listing_pages: usize,
    pub posts: usize,
}

/// Static site generator over a content client
pub struct Generator {
    blog: Blog,
    client: Arc<dyn ContentClient>,
    renderer: TemplateRenderer,
    i18n: I18n,
    dates: DateFormatter,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog, client: Arc<dyn ContentClient>) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let i18n = I18n::with_overrides(blog.config.language, &blog.config.labels);
        let dates = DateFormatter::from_config(&blog.config, &i18n)?;

        Ok(Self {
            blog: blog.clone(),
            client,
            renderer,
            i18n,
            dates,
        })
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    pub fn client(&self) -> &dyn ContentClient {
        self.client.as_ref()
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.write_stylesheet()?;

        let mut report = GenerateReport::default();

        // One listing page per loaded state; each shows every post loaded so far
        let mut state = self.first_page().await?;
        loop {
            let html = self.render_listing(&state)?;
            let path = self.write_output(&listing_path(state.current_page_number()), &html)?;
            tracing::debug!("Generated listing: {:?}", path);
            report.listing_pages += 1;

            if !state.has_more() {
                break;
            }
            state = state.load_next_page(self.client.as_ref(), &self.dates).await?;
        }
        tracing::info!(
            "Generated {} listing pages for {} posts",
            report.listing_pages,
            state.loaded_summaries().len()
        );

        for summary in state.loaded_summaries() {
            self.write_post(&summary.uid).await?;
            report.posts += 1;
        }
        tracing::info!("Generated {} post pages", report.posts);

        Ok(report)
    }

    /// Query the first listing page
    pub async fn first_page(&self) -> Result<PaginationState> {
        let query = Query::new(Predicate::document_type(&self.blog.config.api.document_type))
            .page_size(self.blog.config.api.page_size);
        let response = self.client.query(&query).await?;
        Ok(PaginationState::from_response(&response, &self.dates)?)
    }

    /// Create a base context with common variables
    fn create_base_context(&self) -> Context {
        let config = &self.blog.config;
        let mut context = Context::new();
        context.insert(
            "config",
            &ConfigData {
                title: config.title.clone(),
                description: config.description.clone(),
                root: url_for(config, ""),
                lang: config.language.tag().to_string(),
            },
        );
        context.insert("labels", &self.i18n.get_all_translations());
        context.insert("generator_tag", &meta_generator());
        context.insert("stylesheet", &css(config, "style.css"));
        context.insert("canonical", &full_url_for(config, ""));
        context
    }

    fn nav_post(&self, summary: &PostSummary) -> NavPost {
        NavPost {
            title: summary.title.clone(),
            path: url_for(&self.blog.config, &post_path(&summary.uid)),
        }
    }

    /// Render the listing for a pagination state
    pub fn render_listing(&self, state: &PaginationState) -> Result<String> {
        let posts: Vec<PostCardData> = state
            .loaded_summaries()
            .iter()
            .map(|s| PostCardData {
                title: s.title.clone(),
                subtitle: s.subtitle.clone(),
                author: s.author.clone(),
                publication_date: s.publication_date.clone(),
                path: url_for(&self.blog.config, &post_path(&s.uid)),
            })
            .collect();

        // API pages are numbered consecutively
        let next_link = if state.has_more() {
            url_for(
                &self.blog.config,
                &listing_path(state.current_page_number() + 1),
            )
        } else {
            String::new()
        };

        let mut context = self.create_base_context();
        context.insert(
            "canonical",
            &full_url_for(
                &self.blog.config,
                &listing_path(state.current_page_number()),
            ),
        );
        context.insert("posts", &posts);
        context.insert("next_link", &next_link);

        self.renderer.render("index.html", &context)
    }

    /// Fetch a post with its neighbours and render its page
    pub async fn render_post(&self, uid: &str) -> Result<String> {
        let api = &self.blog.config.api;
        let raw = self.client.get_by_uid(&api.document_type, uid).await?;
        let detail = PostDetail::from_raw(&raw, &self.dates, self.blog.config.reading.words_per_minute)?;
        let adjacent =
            resolve_adjacent(self.client.as_ref(), &api.document_type, &raw.id, &self.dates)
                .await?;

        let mut anchor = CommentAnchor::new();
        let mut loader = CommentWidgetLoader::new(self.blog.config.comments.clone());
        let comments = if loader.after_first_render(&mut anchor) {
            anchor.to_html()
        } else {
            String::new()
        };

        let blocks: Vec<BlockData> = detail
            .content
            .iter()
            .map(|block| BlockData {
                heading: block.heading.clone(),
                html: block.body_html(),
            })
            .collect();
        let description: String = blocks.iter().map(|b| b.html.as_str()).collect();

        let mut context = self.create_base_context();
        context.insert(
            "canonical",
            &full_url_for(&self.blog.config, &post_path(&detail.uid)),
        );
        context.insert("post", &detail);
        context.insert("blocks", &blocks);
        context.insert("description", &description);
        // Shown as at least one minute even for empty posts
        context.insert(
            "reading_time",
            &self.i18n.get_count("reading_time", detail.reading_time.max(1)),
        );
        context.insert("previous", &adjacent.previous.as_ref().map(|p| self.nav_post(p)));
        context.insert("next", &adjacent.next.as_ref().map(|p| self.nav_post(p)));
        context.insert("comments", &comments);
        context.insert("preview", &self.client.is_preview());

        self.renderer.render("post.html", &context)
    }

    /// Render a post and write it under `post/<uid>/`
    pub async fn write_post(&self, uid: &str) -> Result<PathBuf> {
        let dir = self.post_dir(uid)?;
        let html = self.render_post(uid).await?;
        fs::create_dir_all(&dir)?;
        let output_path = dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(output_path)
    }

    /// Render the page shown for unknown posts
    pub fn render_not_found(&self) -> Result<String> {
        self.renderer
            .render("not_found.html", &self.create_base_context())
    }

    /// Output directory of a post; rejects uids that would escape `post/`
    pub fn post_dir(&self, uid: &str) -> Result<PathBuf> {
        if uid.is_empty() || uid == "." || uid == ".." || uid.contains(['/', '\\']) {
            anyhow::bail!("Invalid post uid '{}'", uid);
        }
        Ok(self.blog.public_dir.join("post").join(uid))
    }

    fn write_output(&self, relative_dir: &str, html: &str) -> Result<PathBuf> {
        let output_path = self
            .blog
            .public_dir
            .join(relative_dir.trim_start_matches('/'))
            .join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(output_path)
    }

    fn write_stylesheet(&self) -> Result<()> {
        let dir = self.blog.public_dir.join("css");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }
}
