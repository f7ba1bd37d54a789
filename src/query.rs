//! query builder
//!
//! a [`Query`] pairs cypher text with its parameters and runs once.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::response::{parse_response, Results};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// request body sent to the cypher endpoint
#[derive(Debug, Serialize)]
struct CypherRequest<'a> {
    query: &'a str,
    params: &'a Map<String, Value>,
}

/// why a `params_from` binding was rejected
#[derive(Debug, Clone)]
enum InvalidParams {
    NotAnObject(&'static str),
    Unserializable(String),
}

impl InvalidParams {
    fn to_error(&self) -> Error {
        match self {
            InvalidParams::NotAnObject(kind) => Error::Config(format!(
                "query params must serialize to a json object, got {kind}"
            )),
            InvalidParams::Unserializable(message) => {
                Error::Json(<serde_json::Error as serde::ser::Error>::custom(message))
            }
        }
    }
}

/// a cypher statement bound to a client
///
/// ```no_run
/// use cypher_http::{connect, Result};
///
/// fn example() -> Result<()> {
///     let client = connect("http://localhost", 7474)?;
///     let name = client
///         .cypher("MATCH (p:Person {name: {name}}) RETURN p.name")
///         .params([("name", "Mike")])
///         .execute()?
///         .as_string()?;
///     assert_eq!(name, "Mike");
///     Ok(())
/// }
/// ```
#[must_use = "a query does nothing until executed"]
pub struct Query<'c> {
    client: &'c Client,
    text: String,
    params: Map<String, Value>,
    invalid_params: Option<InvalidParams>,
}

impl<'c> Query<'c> {
    pub(crate) fn new(client: &'c Client, text: String) -> Self {
        Self {
            client,
            text,
            params: Map::new(),
            invalid_params: None,
        }
    }

    /// cypher text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// currently bound parameters
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.params
    }

    /// replace the parameters
    ///
    /// earlier bindings are discarded, not merged.
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.params = params
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.invalid_params = None;
        self
    }

    /// replace the parameters with a serializable value
    ///
    /// the value must serialize to a json object; otherwise `execute` fails
    /// before anything is sent.
    pub fn params_from<P: Serialize + ?Sized>(mut self, params: &P) -> Self {
        self.params = Map::new();
        self.invalid_params = match serde_json::to_value(params) {
            Ok(Value::Object(map)) => {
                self.params = map;
                None
            }
            Ok(other) => Some(InvalidParams::NotAnObject(crate::decode::describe(&other))),
            Err(err) => Some(InvalidParams::Unserializable(err.to_string())),
        };
        self
    }

    /// serialized request body
    pub fn payload(&self) -> Result<Vec<u8>> {
        if let Some(err) = &self.invalid_params {
            return Err(err.to_error());
        }
        let body = CypherRequest {
            query: &self.text,
            params: &self.params,
        };
        Ok(serde_json::to_vec(&body)?)
    }

    /// run the query and decode the tabular response
    pub fn execute(self) -> Result<Results> {
        let client = self.client;
        self.execute_with(|url, body| client.post(url, body))
    }

    pub(crate) fn execute_with<F>(self, send: F) -> Result<Results>
    where
        F: FnOnce(Url, Vec<u8>) -> Result<(StatusCode, String)>,
    {
        let body = self.payload()?;
        let (status, text) = send(self.client.endpoint().clone(), body)?;
        parse_response(status, text)
    }
}

impl std::fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("text", &self.text)
            .field("params", &self.params)
            .field("invalid_params", &self.invalid_params.is_some())
            .finish()
    }
}
