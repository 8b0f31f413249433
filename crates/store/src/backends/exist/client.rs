//! Blocking HTTP client for the eXist-db REST interface.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, info};
use url::Url;

use exlibris_serde::XmlDocument;

use super::config::{ExistConfig, redacted};
use super::response::split_result_fragments;
use crate::core::{CollectionHandle, DocumentStore};
use crate::error::{ConnectionError, QueryError, StoreError, StoreResult};

/// Longest server message kept in a [`QueryError::Rejected`].
const MAX_MESSAGE_LEN: usize = 512;

/// A [`DocumentStore`] backed by an eXist-db server.
///
/// The REST interface is stateless: opening a collection checks that it
/// exists and is readable, and each query is one request.
#[derive(Debug, Clone)]
pub struct ExistRestStore {
    config: ExistConfig,
    base: Url,
    client: Client,
}

impl ExistRestStore {
    /// Validates `config` and builds the HTTP client. No request is made.
    pub fn new(config: ExistConfig) -> Result<Self, ConnectionError> {
        config
            .validate()
            .map_err(|problems| ConnectionError::InvalidConfig { problems })?;

        let base = Url::parse(&config.base_url).map_err(|e| ConnectionError::InvalidUri {
            uri: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConnectionError::Unreachable {
                collection: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            base,
            client,
        })
    }

    pub fn config(&self) -> &ExistConfig {
        &self.config
    }

    /// Resolves a collection or resource path against the base URL.
    pub fn resource_url(&self, path: &str) -> Result<Url, ConnectionError> {
        let invalid = |reason: &str| ConnectionError::InvalidUri {
            uri: path.to_string(),
            reason: reason.to_string(),
        };

        let path = path.trim();
        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.contains(['?', '#']) {
            return Err(invalid("path must not carry a query or fragment"));
        }

        let joined = format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| invalid(&e.to_string()))
    }

    /// Uploads `document` as `resource` into `collection`, replacing any
    /// existing resource of that name.
    pub fn put_document(
        &self,
        collection: &str,
        resource: &str,
        document: &XmlDocument,
    ) -> StoreResult<()> {
        let upload_error = |reason: String| StoreError::Upload {
            collection: collection.to_string(),
            resource: resource.to_string(),
            reason,
        };

        let url = self.resource_url(&format!(
            "{}/{}",
            collection.trim_end_matches('/'),
            resource
        ))?;

        let mut body = Vec::new();
        document.to_xml_writer(&mut body)?;
        let size = body.len();

        let response = self
            .authorized(self.client.put(url))
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response_message(response);
            error!(collection, resource, status = status.as_u16(), "Upload rejected");
            return Err(upload_error(format!("HTTP {}: {}", status.as_u16(), message)));
        }

        info!(collection, resource, bytes = size, "Document uploaded");
        Ok(())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.username, Some(&self.config.password))
    }
}

impl DocumentStore for ExistRestStore {
    type Handle = ExistCollection;

    fn open(&self, path: &str) -> Result<ExistCollection, ConnectionError> {
        let url = self.resource_url(path)?;

        let response = self
            .authorized(self.client.get(url.clone()))
            .query(&[("_howmany", "0")])
            .send()
            .map_err(|e| ConnectionError::Unreachable {
                collection: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        match status.as_u16() {
            _ if status.is_success() => {}
            401 | 403 => {
                return Err(ConnectionError::Unauthorized {
                    collection: path.to_string(),
                    status: status.as_u16(),
                });
            }
            404 => {
                return Err(ConnectionError::CollectionNotFound {
                    collection: path.to_string(),
                });
            }
            _ => {
                return Err(ConnectionError::Unreachable {
                    collection: path.to_string(),
                    reason: format!("HTTP {}: {}", status.as_u16(), response_message(response)),
                });
            }
        }

        debug!(collection = path, url = %url, "eXist collection reachable");
        Ok(ExistCollection {
            client: self.client.clone(),
            url,
            collection: path.to_string(),
            username: self.config.username.clone(),
            password: self.config.password.clone(),
            max_results: self.config.max_results,
            closed: false,
        })
    }
}

/// An open eXist-db collection.
pub struct ExistCollection {
    client: Client,
    url: Url,
    collection: String,
    username: String,
    password: String,
    max_results: u32,
    closed: bool,
}

impl ExistCollection {
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl std::fmt::Debug for ExistCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistCollection")
            .field("url", &self.url.as_str())
            .field("collection", &self.collection)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("max_results", &self.max_results)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl CollectionHandle for ExistCollection {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn query(&mut self, expr: &str) -> Result<Vec<String>, QueryError> {
        if self.closed {
            return Err(QueryError::Closed);
        }

        let max_results = self.max_results.to_string();
        let response = self
            .client
            .get(self.url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .query(&[
                ("_query", expr),
                ("_wrap", "yes"),
                ("_howmany", max_results.as_str()),
            ])
            .send()
            .map_err(|e| QueryError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Rejected {
                status: status.as_u16(),
                message: response_message(response),
            });
        }

        let body = response.text().map_err(|e| QueryError::Transport {
            reason: e.to_string(),
        })?;
        split_result_fragments(&body)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// The response body, trimmed and shortened for error messages.
fn response_message(response: Response) -> String {
    let text = response.text().unwrap_or_default();
    let text = text.trim();
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
