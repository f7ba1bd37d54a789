//! main client
//!
//! holds the connection target and the blocking http transport.

use crate::config::ConnectionTarget;
use crate::error::Result;
use crate::query::Query;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::sync::Arc;
use url::Url;

/// blocking client for a cypher endpoint
///
/// cheap to clone; clones share the target and the http client.
#[derive(Clone)]
pub struct Client {
    target: Arc<ConnectionTarget>,
    endpoint: Url,
    http: reqwest::blocking::Client,
}

impl Client {
    /// create a new client
    pub fn new(target: ConnectionTarget) -> Result<Self> {
        let endpoint = target.validate()?;

        let http = match &target.http_client {
            Some(http) => http.clone(),
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
                headers.extend(target.extra_headers.clone());

                reqwest::blocking::Client::builder()
                    .default_headers(headers)
                    .user_agent(target.user_agent.clone())
                    .timeout(target.timeout)
                    .build()?
            }
        };

        Ok(Self {
            target: Arc::new(target),
            endpoint,
            http,
        })
    }

    /// access the connection target
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub(crate) fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// start a query with no parameters
    pub fn cypher(&self, text: impl Into<String>) -> Query<'_> {
        Query::new(self, text.into())
    }

    /// post a serialized body to `url`, returning status and raw body
    pub(crate) fn post(&self, url: Url, body: Vec<u8>) -> Result<(StatusCode, String)> {
        tracing::debug!(url = %url, bytes = body.len(), "posting cypher query");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        tracing::debug!(status = status.as_u16(), bytes = text.len(), "cypher response");
        Ok((status, text))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// create a client for `{host}:{port}/db/data/cypher` with default settings
pub fn connect(host: impl Into<String>, port: u16) -> Result<Client> {
    Client::new(ConnectionTarget::new(host, port))
}
