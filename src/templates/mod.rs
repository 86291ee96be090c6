//! Built-in theme templates using the Tera template engine
//!
//! Templates and the stylesheet are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Stylesheet written to `css/style.css`
pub const STYLESHEET: &str = include_str!("spacetraveling/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rich text and the comments anchor arrive as ready-made HTML;
        // content strings are escaped explicitly in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("spacetraveling/layout.html")),
            ("index.html", include_str!("spacetraveling/index.html")),
            ("post.html", include_str!("spacetraveling/post.html")),
            ("not_found.html", include_str!("spacetraveling/not_found.html")),
            (
                "partials/header.html",
                include_str!("spacetraveling/partials/header.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: drop markup and collapse the remaining whitespace
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let html = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_tags(&html)))
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        // A tag separates words, e.g. `</p><p>`
        text.push(' ');
        rest = match rest[open..].find('>') {
            Some(close) => &rest[open + close + 1..],
            None => "",
        };
    }
    text.push_str(rest);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tera filter: shorten to `length` characters, cutting at a word boundary
/// when one exists, and append `omission`
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let text = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = args
        .get("length")
        .map(|v| tera::from_value::<usize>(v.clone()))
        .transpose()
        .map_err(|e| tera::Error::msg(format!("truncate_chars: invalid `length`: {}", e)))?
        .unwrap_or(160);
    let omission = args
        .get("omission")
        .map(|v| tera::from_value::<String>(v.clone()))
        .transpose()
        .map_err(|e| tera::Error::msg(format!("truncate_chars: invalid `omission`: {}", e)))?
        .unwrap_or_else(|| "...".to_string());

    Ok(tera::Value::String(truncate_words(&text, length, &omission)))
}

fn truncate_words(text: &str, length: usize, omission: &str) -> String {
    let Some((cut, _)) = text.char_indices().nth(length) else {
        return text.to_string();
    };
    let head = &text[..cut];
    let head = match head.rfind(' ') {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };
    format!("{}{}", head.trim_end(), omission)
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub root: String,
    pub lang: String,
}

/// A listing entry with its link
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub publication_date: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

/// A content block with its body already rendered
#[derive(Debug, Clone, Serialize)]
pub struct BlockData {
    pub heading: String,
    pub html: String,
}
