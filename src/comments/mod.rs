//! utterances comment widget
//!
//! The widget is a third-party script appended into a fixed anchor element.
//! A loader appends it on the first render of a post page and never again.

use crate::config::CommentsConfig;
use crate::helpers::html_escape;

/// Id of the element the widget script is mounted into
pub const ANCHOR_ID: &str = "inject-comments-for-uterances";

/// A `<script>` element with ordered attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    attributes: Vec<(String, String)>,
}

impl ScriptElement {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_html(&self) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(n, v)| format!(r#" {}="{}""#, n, html_escape(v)))
            .collect();
        format!("<script{}></script>", attrs)
    }
}

impl Default for ScriptElement {
    fn default() -> Self {
        Self::new()
    }
}

/// The element the widget is mounted into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAnchor {
    id: String,
    children: Vec<ScriptElement>,
}

impl CommentAnchor {
    pub fn new() -> Self {
        Self {
            id: ANCHOR_ID.to_string(),
            children: Vec::new(),
        }
    }

    pub fn append_child(&mut self, script: ScriptElement) {
        self.children.push(script);
    }

    pub fn children(&self) -> &[ScriptElement] {
        &self.children
    }

    pub fn to_html(&self) -> String {
        let inner: String = self.children.iter().map(ScriptElement::to_html).collect();
        format!(r#"<div id="{}">{}</div>"#, self.id, inner)
    }
}

impl Default for CommentAnchor {
    fn default() -> Self {
        Self::new()
    }
}

/// Mounts the widget script once per page display
#[derive(Debug, Clone)]
pub struct CommentWidgetLoader {
    config: CommentsConfig,
    has_run: bool,
}

impl CommentWidgetLoader {
    pub fn new(config: CommentsConfig) -> Self {
        Self {
            config,
            has_run: false,
        }
    }

    /// Whether a repository is configured at all
    pub fn is_enabled(&self) -> bool {
        self.config.repo.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Append the widget script to `anchor` on the first call only
    ///
    /// Returns whether a script was appended.
    pub fn after_first_render(&mut self, anchor: &mut CommentAnchor) -> bool {
        if self.has_run {
            return false;
        }
        self.has_run = true;

        let Some(repo) = self.config.repo.as_deref().filter(|r| !r.is_empty()) else {
            tracing::debug!("No comments repository configured, skipping widget");
            return false;
        };

        let mut script = ScriptElement::new();
        script.set_attribute("src", &self.config.script_src);
        script.set_attribute("crossorigin", "anonymous");
        script.set_attribute("async", "true");
        script.set_attribute("repo", repo);
        script.set_attribute("issue-term", &self.config.issue_term);
        script.set_attribute("theme", &self.config.theme);
        anchor.append_child(script);
        true
    }
}
