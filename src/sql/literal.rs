// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::database_error::DatabaseError;

use super::sql_type::{Nullability, SQLType};
use super::sql_value::SQLValue;
use super::{ExpressionBuilder, SQLBuilder};

/// A typed SQL literal: a declared type paired with a value, or a typed NULL when the
/// value is absent.
///
/// Rendering follows the SQLite dialect: strings single-quoted with inner quotes
/// doubled, booleans as `1`/`0`, timestamps as ISO-8601 with millisecond precision and
/// a trailing `Z`, blobs as `x'<hex>'`.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    typ: SQLType,
    value: Option<SQLValue>,
}

impl Literal {
    /// Create a literal of the given target type. A `Null` value produces a typed NULL.
    /// The value must belong to the target type's native category; an integer is
    /// additionally accepted for a `REAL` target.
    pub fn new(typ: SQLType, value: impl Into<SQLValue>) -> Result<Literal, DatabaseError> {
        let value = value.into();
        let value = match (typ, value) {
            (_, SQLValue::Null) => None,
            (SQLType::Real, SQLValue::Integer(i)) => Some(SQLValue::Real(i as f64)),
            (typ, value) => match value.type_of() {
                Some(value_typ) if typ.is_compatible_with(value_typ) && typ.promote(value_typ) == typ => {
                    Some(value)
                }
                _ => {
                    return Err(DatabaseError::InvalidLiteral(format!(
                        "value {value:?} cannot be coerced to {typ}"
                    )))
                }
            },
        };

        Ok(Literal { typ, value })
    }

    /// A typed NULL literal.
    pub fn null(typ: SQLType) -> Literal {
        Literal { typ, value: None }
    }

    pub fn typ(&self) -> SQLType {
        self.typ
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    pub fn nullability(&self) -> Nullability {
        if self.is_null() {
            Nullability::Sometimes
        } else {
            Nullability::Never
        }
    }

    pub(crate) fn from_native(typ: SQLType, value: SQLValue) -> Literal {
        Literal {
            typ,
            value: Some(value),
        }
    }
}

impl ExpressionBuilder for Literal {
    /// Literals are atomic; the `grouped` hint is ignored.
    fn build(&self, _grouped: bool, builder: &mut SQLBuilder) {
        match &self.value {
            None => builder.push_str("NULL"),
            Some(SQLValue::Null) => builder.push_str("NULL"),
            Some(SQLValue::Text(s)) => {
                builder.push('\'');
                builder.push_str(s.replace('\'', "''"));
                builder.push('\'');
            }
            Some(SQLValue::Integer(i)) => builder.push_str(i.to_string()),
            // The Debug form keeps a decimal point on round reals (`2.0`, not `2`)
            Some(SQLValue::Real(r)) => builder.push_str(format!("{r:?}")),
            Some(SQLValue::Boolean(b)) => builder.push_str(if *b { "1" } else { "0" }),
            Some(SQLValue::Timestamp(t)) => {
                builder.push('\'');
                builder.push_str(t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string());
                builder.push('\'');
            }
            Some(SQLValue::Blob(bytes)) => {
                builder.push_str("x'");
                builder.push_str(hex::encode(bytes));
                builder.push('\'');
            }
        }
    }
}
