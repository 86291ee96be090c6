//! HTTP client for the content API.
//!
//! `ContentClient` is the seam the rest of the crate depends on; the
//! generator and formatters never see HTTP details. `PrismicClient` is the
//! production implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::model::{ApiInfo, ApiResponse, RawPost};
use super::query::{Predicate, Query};
use crate::config::ApiConfig;
use crate::error::{ContentError, Result};

/// Read-only access to the content API
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Run a search query
    async fn query(&self, query: &Query) -> Result<ApiResponse>;

    /// Fetch a pagination URL exactly as the API handed it out
    async fn fetch_page(&self, url: &str) -> Result<ApiResponse>;

    /// Fetch a single document by its unique identifier
    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<RawPost> {
        let response = self
            .query(&Query::new(Predicate::uid(doc_type, uid)).page_size(1))
            .await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }

    /// Whether queries run against a preview ref instead of published content
    fn is_preview(&self) -> bool {
        false
    }
}

/// Prismic REST API v2 client
pub struct PrismicClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
    preview_ref: Option<String>,
    master_ref: OnceCell<String>,
}

impl PrismicClient {
    /// Create a client from the `api` section of the site config
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        Url::parse(&endpoint).map_err(|e| ContentError::InvalidUrl(format!("{endpoint}: {e}")))?;

        Ok(Self {
            client: builder.build()?,
            endpoint,
            access_token: config.access_token.clone(),
            preview_ref: config.preview_ref.clone(),
            master_ref: OnceCell::new(),
        })
    }

    /// The ref every search runs against
    async fn content_ref(&self) -> Result<&str> {
        if let Some(preview) = &self.preview_ref {
            return Ok(preview.as_str());
        }

        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                let url = self.url(&self.endpoint, Vec::new())?;
                let info: ApiInfo = self.get_json(url).await?;
                let master = info
                    .master_ref()
                    .ok_or_else(|| ContentError::MissingMasterRef(self.endpoint.clone()))?;
                tracing::debug!("Resolved master ref {}", master);
                Ok::<_, ContentError>(master.to_string())
            })
            .await?;
        Ok(reference.as_str())
    }

    fn url(&self, base: &str, mut params: Vec<(&'static str, String)>) -> Result<Url> {
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }
        Url::parse_with_params(base, &params)
            .map_err(|e| ContentError::InvalidUrl(format!("{base}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", redact(&url));

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
                url: redact(&url),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentClient for PrismicClient {
    async fn query(&self, query: &Query) -> Result<ApiResponse> {
        let reference = self.content_ref().await?.to_string();
        let mut params = vec![("ref", reference)];
        params.extend(query.to_params());

        let url = self.url(&format!("{}/documents/search", self.endpoint), params)?;
        self.get_json(url).await
    }

    async fn fetch_page(&self, url: &str) -> Result<ApiResponse> {
        let url = Url::parse(url).map_err(|e| ContentError::InvalidUrl(format!("{url}: {e}")))?;
        self.get_json(url).await
    }

    fn is_preview(&self) -> bool {
        self.preview_ref.is_some()
    }
}

/// Render a URL for logs with the access token masked
fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "access_token") {
        return url.to_string();
    }

    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "access_token" {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
