//! cypher http client
//!
//! this crate provides a small, blocking client for the cypher rest endpoint
//! (`{host}:{port}/db/data/cypher`). start with [`connect`] or
//! [`Client::new`], build a [`Query`], execute it, then pick the accessor on
//! [`Results`] that matches what the query returns.
//!
//! ## quick start
//!
//! ```no_run
//! use cypher_http::connect;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = connect("http://localhost", 7474)?;
//! let node = client
//!     .cypher("MERGE (p:Person {name: {name}}) RETURN p")
//!     .params([("name", "Mike")])
//!     .execute()?
//!     .as_node()?;
//! println!("{:?}", node.properties);
//! # Ok(())
//! # }
//! ```
//!
//! ## result shapes
//!
//! the endpoint answers with untyped `columns` and `data` rows. the `as_*`
//! accessors read the first row; [`Results::scalar`], [`Results::rows_as`]
//! and [`Results::column`] take any [`FromValue`] shape. a value of the
//! wrong kind is reported as [`Error::Shape`], never coerced.

mod client;
mod config;
mod decode;
mod error;
mod query;
mod record;
mod response;

pub use client::{connect, Client};
pub use config::{ConnectionTarget, CYPHER_PATH, HOST_ENV, PORT_ENV};
pub use decode::FromValue;
pub use error::{Error, Result};
pub use query::Query;
pub use record::{Node, Relationship};
pub use response::{Results, ServerFault};
