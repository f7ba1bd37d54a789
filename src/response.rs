//! cypher response types
//!
//! the tabular success body, the fault body, and the typed accessors over
//! the tabular rows.

use crate::decode::{describe, FromValue};
use crate::error::{Error, Result};
use crate::record::{Node, Relationship};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// tabular result of a cypher query
///
/// `columns` and every row are untyped; pick the accessor that matches the
/// shape your query returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// column descriptors, usually the column names
    #[serde(default, deserialize_with = "null_as_empty")]
    pub columns: Vec<Value>,
    /// result rows (`data` on the wire)
    #[serde(default, rename = "data", deserialize_with = "null_as_empty")]
    pub rows: Vec<Vec<Value>>,
}

// `null` and a missing field both mean no entries
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// fault body returned with any non-200 status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ServerFault {
    /// human readable message
    #[serde(default)]
    pub message: String,
    /// short exception name
    #[serde(default)]
    pub exception: String,
    /// fully qualified exception name
    #[serde(default, rename = "fullname")]
    pub full_name: String,
    /// server side stack frames
    #[serde(default)]
    pub stacktrace: Vec<String>,
}

pub(crate) fn parse_response(status: StatusCode, text: String) -> Result<Results> {
    if status != StatusCode::OK {
        let fault = match serde_json::from_str::<ServerFault>(&text) {
            Ok(fault) => fault,
            Err(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "unreadable fault body");
                ServerFault::default()
            }
        };
        return Err(Error::Server {
            status: status.as_u16(),
            fault,
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

impl Results {
    /// column descriptors
    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    /// all rows
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// true if the query returned no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// position of the column named `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.as_str() == Some(name))
    }

    /// the first row
    pub fn first_row(&self) -> Result<&[Value]> {
        self.rows
            .first()
            .map(Vec::as_slice)
            .ok_or_else(|| Error::shape("at least one row", "no rows"))
    }

    /// the first value of the first row
    pub fn first_value(&self) -> Result<&Value> {
        self.first_row()?
            .first()
            .ok_or_else(|| Error::shape("at least one column", "an empty row"))
    }

    /// decode the first value of the first row as `T`
    pub fn scalar<T: FromValue>(&self) -> Result<T> {
        T::from_value(self.first_value()?)
    }

    /// decode every value of the first row as `T`
    pub fn first_row_as<T: FromValue>(&self) -> Result<Vec<T>> {
        self.first_row()?.iter().map(T::from_value).collect()
    }

    /// decode every value of every row as `T`
    pub fn rows_as<T: FromValue>(&self) -> Result<Vec<Vec<T>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(T::from_value).collect())
            .collect()
    }

    /// decode the column named `name` across every row
    pub fn column<T: FromValue>(&self, name: &str) -> Result<Vec<T>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::shape("a column with that name", format!("no column {name:?}")))?;
        self.rows
            .iter()
            .map(|row| match row.get(index) {
                Some(value) => T::from_value(value),
                None => Err(Error::shape(T::EXPECTED, "a short row")),
            })
            .collect()
    }

    /// deserialize the first value of the first row with serde
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.first_value()?;
        serde_json::from_value(value.clone()).map_err(|err| {
            Error::shape(
                std::any::type_name::<T>(),
                format!("{} ({err})", describe(value)),
            )
        })
    }

    /// one integer, for queries returning a single number
    pub fn as_int(&self) -> Result<i64> {
        self.scalar()
    }

    /// the integers of the first row
    pub fn as_ints(&self) -> Result<Vec<i64>> {
        self.first_row_as()
    }

    /// one string
    pub fn as_string(&self) -> Result<String> {
        self.scalar()
    }

    /// the strings of the first row
    pub fn as_strings(&self) -> Result<Vec<String>> {
        self.first_row_as()
    }

    /// one node
    pub fn as_node(&self) -> Result<Node> {
        self.scalar()
    }

    /// the nodes of the first row
    pub fn as_nodes(&self) -> Result<Vec<Node>> {
        self.first_row_as()
    }

    /// one relationship
    pub fn as_relationship(&self) -> Result<Relationship> {
        self.scalar()
    }

    /// the relationships of the first row
    pub fn as_relationships(&self) -> Result<Vec<Relationship>> {
        self.first_row_as()
    }
}
