//! Rich text to HTML conversion

use super::model::{RichTextNode, Span};
use crate::helpers::{html_escape, post_path};

/// Render a sequence of rich-text nodes as HTML
///
/// Consecutive list items are grouped into one `<ul>` or `<ol>`.
pub fn as_html(nodes: &[RichTextNode]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for node in nodes {
        let list = match node.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }
        html.push_str(&render_node(node));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn render_node(node: &RichTextNode) -> String {
    let kind = node.kind.as_str();

    if let Some(level) = heading_level(kind) {
        return format!(
            "<h{}>{}</h{}>",
            level,
            render_inline(&node.text, &node.spans),
            level
        );
    }

    match kind {
        "paragraph" => format!("<p>{}</p>", render_inline(&node.text, &node.spans)),
        "preformatted" => format!("<pre>{}</pre>", render_inline(&node.text, &node.spans)),
        "list-item" | "o-list-item" => {
            format!("<li>{}</li>", render_inline(&node.text, &node.spans))
        }
        "image" => match &node.url {
            Some(url) => format!(
                r#"<p class="block-img"><img src="{}" alt="{}"></p>"#,
                html_escape(url),
                html_escape(node.alt.as_deref().unwrap_or(""))
            ),
            None => String::new(),
        },
        other => {
            tracing::debug!("Skipping unsupported rich text node '{}'", other);
            String::new()
        }
    }
}

fn heading_level(kind: &str) -> Option<u8> {
    kind.strip_prefix("heading")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=6).contains(n))
}

/// Render text with its formatting spans applied
///
/// Overlapping spans that are not properly nested are closed and reopened
/// around each other so the output stays well-formed.
fn render_inline(text: &str, spans: &[Span]) -> String {
    let mut spans: Vec<&Span> = spans.iter().filter(|s| s.start < s.end).collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<&Span> = Vec::new();
    let mut pending = spans.into_iter().peekable();
    let mut offset = 0;

    for ch in text.chars() {
        close_spans(&mut out, &mut stack, offset);
        while let Some(span) = pending.next_if(|s| s.start <= offset) {
            out.push_str(&open_tag(span));
            stack.push(span);
        }

        match ch {
            '\n' => out.push_str("<br />"),
            _ => out.push_str(&html_escape(ch.encode_utf8(&mut [0; 4]))),
        }
        offset += ch.len_utf16();
    }

    while let Some(span) = stack.pop() {
        out.push_str(close_tag(span));
    }

    out
}

/// Close every span ending at or before `pos`, reopening inner spans that
/// are still running
fn close_spans<'a>(out: &mut String, stack: &mut Vec<&'a Span>, pos: usize) {
    if !stack.iter().any(|s| s.end <= pos) {
        return;
    }

    let mut reopen = Vec::new();
    while let Some(span) = stack.pop() {
        out.push_str(close_tag(span));
        if span.end > pos {
            reopen.push(span);
        }
        if !stack.iter().any(|s| s.end <= pos) {
            break;
        }
    }

    for span in reopen.into_iter().rev() {
        out.push_str(&open_tag(span));
        stack.push(span);
    }
}

fn open_tag(span: &Span) -> String {
    match span.kind.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let href = span.data.as_ref().and_then(link_href).unwrap_or_default();
            let external = span
                .data
                .as_ref()
                .and_then(|d| d.get("target"))
                .and_then(|t| t.as_str())
                .is_some();
            if external {
                format!(
                    r#"<a href="{}" target="_blank" rel="noopener">"#,
                    html_escape(&href)
                )
            } else {
                format!(r#"<a href="{}">"#, html_escape(&href))
            }
        }
        "label" => {
            let class = span
                .data
                .as_ref()
                .and_then(|d| d.get("label"))
                .and_then(|l| l.as_str())
                .unwrap_or("");
            format!(r#"<span class="{}">"#, html_escape(class))
        }
        _ => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "</span>",
    }
}

/// Web links carry a `url`; document links are resolved to the post route
fn link_href(data: &serde_json::Value) -> Option<String> {
    if let Some(url) = data.get("url").and_then(|u| u.as_str()) {
        return Some(url.to_string());
    }
    data.get("uid")
        .and_then(|u| u.as_str())
        .map(|uid| format!("/{}", post_path(uid)))
}
