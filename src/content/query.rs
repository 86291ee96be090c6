//! Search query construction

/// A document filter in the API's predicate syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[at(document.type, "posts")]`
    DocumentType(String),
    /// `[at(my.posts.uid, "slug")]`
    Uid { doc_type: String, uid: String },
}

impl Predicate {
    pub fn document_type(doc_type: impl Into<String>) -> Self {
        Predicate::DocumentType(doc_type.into())
    }

    pub fn uid(doc_type: impl Into<String>, uid: impl Into<String>) -> Self {
        Predicate::Uid {
            doc_type: doc_type.into(),
            uid: uid.into(),
        }
    }

    fn render(&self) -> String {
        match self {
            Predicate::DocumentType(t) => format!("[at(document.type, \"{}\")]", escape(t)),
            Predicate::Uid { doc_type, uid } => {
                format!("[at(my.{}.uid, \"{}\")]", doc_type, escape(uid))
            }
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Result ordering field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    FirstPublicationDate,
    LastPublicationDate,
}

impl Ordering {
    fn render(self) -> &'static str {
        match self {
            Ordering::FirstPublicationDate => "[document.first_publication_date]",
            Ordering::LastPublicationDate => "[document.last_publication_date]",
        }
    }
}

/// A search query against the documents endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    predicate: Predicate,
    page_size: Option<u32>,
    after: Option<String>,
    ordering: Option<Ordering>,
}

impl Query {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            page_size: None,
            after: None,
            ordering: None,
        }
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Only return documents after the one with this id
    pub fn after(mut self, id: impl Into<String>) -> Self {
        self.after = Some(id.into());
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Query-string pairs, excluding `ref` and `access_token`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", format!("[{}]", self.predicate.render()))];
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        if let Some(ordering) = self.ordering {
            params.push(("orderings", ordering.render().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_query() {
        let params = Query::new(Predicate::document_type("posts"))
            .page_size(1)
            .to_params();
        assert_eq!(
            params,
            vec![
                ("q", "[[at(document.type, \"posts\")]]".to_string()),
                ("pageSize", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_adjacent_query() {
        let params = Query::new(Predicate::document_type("posts"))
            .page_size(1)
            .after("YFjqlhIAACEAkj8V")
            .order_by(Ordering::LastPublicationDate)
            .to_params();
        assert_eq!(params[2], ("after", "YFjqlhIAACEAkj8V".to_string()));
        assert_eq!(
            params[3],
            ("orderings", "[document.last_publication_date]".to_string())
        );
    }

    #[test]
    fn test_uid_predicate_escapes_quotes() {
        let params = Query::new(Predicate::uid("posts", "a\"b")).to_params();
        assert_eq!(params[0].1, "[[at(my.posts.uid, \"a\\\"b\")]]");
    }
}
