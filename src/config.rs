//! connection configuration
//!
//! build a [`ConnectionTarget`] from a host and port, then pass it to
//! [`crate::Client::new`] to create a client.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// path of the cypher endpoint below `{host}:{port}`
pub const CYPHER_PATH: &str = "/db/data/cypher";

/// environment variable read by [`ConnectionTarget::from_env`] for the host
pub const HOST_ENV: &str = "CYPHER_HTTP_HOST";

/// environment variable read by [`ConnectionTarget::from_env`] for the port
pub const PORT_ENV: &str = "CYPHER_HTTP_PORT";

const DEFAULT_HOST: &str = "http://localhost";
const DEFAULT_PORT: u16 = 7474;

/// where and how to reach a cypher endpoint
#[derive(Clone)]
pub struct ConnectionTarget {
    /// host including scheme (e.g., "http://localhost")
    pub(crate) host: String,

    /// tcp port of the rest api
    pub(crate) port: u16,

    /// `{host}:{port}/db/data/cypher`, fixed at construction
    pub(crate) endpoint_url: String,

    /// request timeout, `None` disables it
    pub(crate) timeout: Option<Duration>,

    /// user agent string
    pub(crate) user_agent: String,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (transport fields above are ignored when set)
    pub(crate) http_client: Option<reqwest::blocking::Client>,
}

impl ConnectionTarget {
    /// create a target for `host` and `port`
    ///
    /// the host carries the scheme; the endpoint is derived verbatim.
    ///
    /// # example
    ///
    /// ```
    /// use cypher_http::ConnectionTarget;
    ///
    /// let target = ConnectionTarget::new("http://localhost", 7474);
    /// assert_eq!(target.endpoint_url(), "http://localhost:7474/db/data/cypher");
    /// ```
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let endpoint_url = format!("{host}:{port}{CYPHER_PATH}");

        Self {
            host,
            port,
            endpoint_url,
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("cypher-http/{} (Rust)", env!("CARGO_PKG_VERSION")),
            extra_headers: HeaderMap::new(),
            http_client: None,
        }
    }

    /// read the target from `CYPHER_HTTP_HOST` and `CYPHER_HTTP_PORT`
    ///
    /// missing variables fall back to `http://localhost` and `7474`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_or(None, None)
    }

    /// like [`ConnectionTarget::from_env`], but a given `host` or `port` wins
    ///
    /// a variable is only read when the matching value is `None`.
    pub fn from_env_or(host: Option<String>, port: Option<u16>) -> Result<Self> {
        Self::from_env_with(host, port, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_env_with<F>(
        host: Option<String>,
        port: Option<u16>,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match host {
            Some(host) => host,
            None => lookup(HOST_ENV)
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        };
        let port = match port {
            Some(port) => port,
            None => match lookup(PORT_ENV).filter(|p| !p.is_empty()) {
                Some(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .map_err(|err| Error::Config(format!("invalid {PORT_ENV} {raw:?}: {err}")))?,
                None => DEFAULT_PORT,
            },
        };
        Ok(Self::new(host, port))
    }

    /// host as given at construction
    pub fn host(&self) -> &str {
        &self.host
    }

    /// port as given at construction
    pub fn port(&self) -> u16 {
        self.port
    }

    /// the cypher endpoint url
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// set the request timeout (`None` waits indefinitely)
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access extra headers configured on this target
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// inject a prebuilt blocking http client.
    ///
    /// when set, the client is used as-is: timeout, user agent and extra
    /// headers configured here are not applied to it.
    pub fn with_http_client(mut self, http_client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// check the endpoint and return it parsed
    pub(crate) fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint_url).map_err(Error::from)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. host must start with http:// or https://",
                url.scheme()
            )));
        }

        Ok(url)
    }
}

impl std::fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}
