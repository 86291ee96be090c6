//! Raw records as returned by the content API

use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` as the type's default; empty Key Text fields
/// come back as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    /// Absolute URL of the following page, `None` on the last page
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<RawPost>,
}

/// A post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: RawPostData,
}

/// Custom fields of a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPostData {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    pub banner: Banner,
    pub content: Vec<RawContentBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub alt: Option<String>,
}

/// A repeatable content group: an optional heading followed by rich text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContentBlock {
    pub heading: Option<String>,
    pub body: Vec<RichTextNode>,
}

/// A structured text fragment (paragraph, heading, list item, image...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image source for `image` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl RichTextNode {
    /// Shorthand for a paragraph node without formatting
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Inline formatting over a range of a node's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Offsets are UTF-16 code unit indexes into `text`
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Repository metadata from the API root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

impl ApiInfo {
    /// The ref pointing at published content
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "page": 1,
            "results_per_page": 1,
            "results_size": 1,
            "total_results_size": 3,
            "total_pages": 3,
            "next_page": "https://blog.cdn.prismic.io/api/v2/documents/search?page=2&pageSize=1",
            "prev_page": null,
            "results": [{
                "id": "YFjqlhIAACEAkj8V",
                "uid": "como-utilizar-hooks",
                "type": "posts",
                "first_publication_date": "2021-03-15T19:25:28+0000",
                "last_publication_date": "2021-03-25T19:27:35+0000",
                "data": {
                    "title": "Como utilizar Hooks",
                    "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                    "author": "Joseph Oliveira",
                    "banner": { "url": "https://images.prismic.io/banner.png" },
                    "content": [{
                        "heading": "Proin et varius",
                        "body": [{ "type": "paragraph", "text": "Nullam dolor sapien", "spans": [] }]
                    }]
                }
            }]
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.page, 1);
        assert_eq!(response.total_pages, 3);
        assert!(response.next_page.is_some());
        assert!(response.prev_page.is_none());

        let post = &response.results[0];
        assert_eq!(post.uid.as_deref(), Some("como-utilizar-hooks"));
        assert_eq!(post.doc_type, "posts");
        assert_eq!(post.data.author, "Joseph Oliveira");
        assert_eq!(post.data.content[0].heading.as_deref(), Some("Proin et varius"));
        assert_eq!(post.data.content[0].body[0].kind, "paragraph");
    }

    #[test]
    fn test_parse_sparse_record() {
        let json = r#"{ "id": "X1", "first_publication_date": null, "data": {} }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert!(post.uid.is_none());
        assert!(post.first_publication_date.is_none());
        assert!(post.data.content.is_empty());
        assert_eq!(post.data.banner.url, "");
    }

    #[test]
    fn test_null_text_fields_are_empty() {
        let json = r#"{
            "id": "X1",
            "uid": "a",
            "type": "posts",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "data": {
                "title": "T",
                "subtitle": null,
                "author": null,
                "banner": { "url": null },
                "content": [{
                    "heading": null,
                    "body": [{ "type": "paragraph", "text": null, "spans": [] }]
                }]
            }
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.data.title, "T");
        assert_eq!(post.data.subtitle, "");
        assert_eq!(post.data.author, "");
        assert_eq!(post.data.banner.url, "");
        assert!(post.data.content[0].heading.is_none());
        assert_eq!(post.data.content[0].body[0].text, "");
    }

    #[test]
    fn test_master_ref() {
        let json = r#"{ "refs": [
            { "id": "preview", "ref": "abc~1", "label": "Release", "isMasterRef": false },
            { "id": "master", "ref": "YFjq~master", "label": "Master", "isMasterRef": true }
        ] }"#;
        let info: ApiInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.master_ref(), Some("YFjq~master"));
    }
}
