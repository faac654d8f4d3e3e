// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sql_type::SQLType;

/// A row as a map from column name to native value, used both for insert input and for
/// marshalled query results.
pub type Row = std::collections::HashMap<String, SQLValue>;

/// A native value that can appear as a SQL literal or in a marshalled row.
///
/// `Null` carries no type of its own; a nullable literal is a typed NULL, formed by
/// pairing a `Null` value with a target [`SQLType`] (see [`Literal`](super::Literal)).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SQLValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Blob(Vec<u8>),
    Null,
}

impl SQLValue {
    /// The SQL type this value naturally carries, or `None` for `Null`.
    pub fn type_of(&self) -> Option<SQLType> {
        match self {
            SQLValue::Text(_) => Some(SQLType::Text),
            SQLValue::Integer(_) => Some(SQLType::Integer),
            SQLValue::Real(_) => Some(SQLType::Real),
            SQLValue::Boolean(_) => Some(SQLType::Boolean),
            SQLValue::Timestamp(_) => Some(SQLType::Timestamp),
            SQLValue::Blob(_) => Some(SQLType::Blob),
            SQLValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SQLValue::Null)
    }
}

impl From<&str> for SQLValue {
    fn from(value: &str) -> Self {
        SQLValue::Text(value.to_owned())
    }
}

impl From<String> for SQLValue {
    fn from(value: String) -> Self {
        SQLValue::Text(value)
    }
}

impl From<i64> for SQLValue {
    fn from(value: i64) -> Self {
        SQLValue::Integer(value)
    }
}

impl From<i32> for SQLValue {
    fn from(value: i32) -> Self {
        SQLValue::Integer(value as i64)
    }
}

impl From<f64> for SQLValue {
    fn from(value: f64) -> Self {
        SQLValue::Real(value)
    }
}

impl From<bool> for SQLValue {
    fn from(value: bool) -> Self {
        SQLValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for SQLValue {
    fn from(value: DateTime<Utc>) -> Self {
        SQLValue::Timestamp(value)
    }
}

impl From<Vec<u8>> for SQLValue {
    fn from(value: Vec<u8>) -> Self {
        SQLValue::Blob(value)
    }
}

impl From<&[u8]> for SQLValue {
    fn from(value: &[u8]) -> Self {
        SQLValue::Blob(value.to_vec())
    }
}

impl<T: Into<SQLValue>> From<Option<T>> for SQLValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => SQLValue::Null,
        }
    }
}

/// Conversion from the driver's value type, used when marshalling rows. SQLite has no
/// boolean or timestamp storage classes, so those come back as `Integer` and `Text`.
impl From<rusqlite::types::Value> for SQLValue {
    fn from(value: rusqlite::types::Value) -> Self {
        match value {
            rusqlite::types::Value::Null => SQLValue::Null,
            rusqlite::types::Value::Integer(i) => SQLValue::Integer(i),
            rusqlite::types::Value::Real(r) => SQLValue::Real(r),
            rusqlite::types::Value::Text(s) => SQLValue::Text(s),
            rusqlite::types::Value::Blob(b) => SQLValue::Blob(b),
        }
    }
}
