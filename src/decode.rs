//! value decoding
//!
//! [`FromValue`] names the shape an accessor expects and converts one
//! untyped cell into it.

use crate::error::{Error, Result};
use crate::record::{Node, Relationship};
use serde_json::{Map, Value};

/// conversion from one untyped result cell
///
/// implementations never coerce: a value of the wrong kind is an
/// [`Error::Shape`].
pub trait FromValue: Sized {
    /// description of the expected shape, used in mismatch errors
    const EXPECTED: &'static str;

    /// convert `value`
    fn from_value(value: &Value) -> Result<Self>;
}

/// short name of a json value's kind
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mismatch<T: FromValue>(value: &Value) -> Error {
    Error::shape(T::EXPECTED, describe(value))
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            // numbers outside i64 saturate, fractions truncate
            Value::Number(n) => Ok(n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| mismatch::<Self>(value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

fn element<'a, T: FromValue>(value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch::<T>(value))
}

fn properties<T: FromValue>(object: &Map<String, Value>) -> Result<Map<String, Value>> {
    match object.get("data") {
        Some(Value::Object(data)) => Ok(data.clone()),
        Some(other) => Err(Error::shape(
            T::EXPECTED,
            format!("`data` holding {}", describe(other)),
        )),
        None => Err(Error::shape(T::EXPECTED, "an object without `data`")),
    }
}

fn text_field<T: FromValue>(object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::shape(
            T::EXPECTED,
            format!("`{field}` holding {}", describe(other)),
        )),
        None => Err(Error::shape(
            T::EXPECTED,
            format!("an object without `{field}`"),
        )),
    }
}

impl FromValue for Node {
    const EXPECTED: &'static str = "a node object with a `data` map";

    fn from_value(value: &Value) -> Result<Self> {
        let object = element::<Self>(value)?;
        Ok(Node {
            properties: properties::<Self>(object)?,
        })
    }
}

impl FromValue for Relationship {
    const EXPECTED: &'static str =
        "a relationship object with `data`, `type`, `start` and `end`";

    fn from_value(value: &Value) -> Result<Self> {
        let object = element::<Self>(value)?;
        Ok(Relationship {
            properties: properties::<Self>(object)?,
            rel_type: text_field::<Self>(object, "type")?,
            start: text_field::<Self>(object, "start")?,
            end: text_field::<Self>(object, "end")?,
        })
    }
}
