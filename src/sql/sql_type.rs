// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// The type of a SQL expression or a declared column.
///
/// `Text` and `Varchar` are interchangeable for type-compatibility purposes; they
/// differ only in the keyword emitted in DDL.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SQLType {
    Text,
    Varchar,
    Integer,
    Real,
    Boolean,
    Timestamp,
    Blob,
}

impl SQLType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, SQLType::Integer | SQLType::Real)
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, SQLType::Text | SQLType::Varchar)
    }

    pub fn is_compatible_with(&self, other: SQLType) -> bool {
        *self == other
            || (self.is_textual() && other.is_textual())
            || (self.is_numeric() && other.is_numeric())
    }

    /// The common type of two compatible operands: `REAL` dominates `INTEGER`, and the
    /// left type wins among interchangeable textual types.
    pub(crate) fn promote(&self, other: SQLType) -> SQLType {
        if self.is_numeric() && other.is_numeric() {
            if *self == SQLType::Real || other == SQLType::Real {
                SQLType::Real
            } else {
                SQLType::Integer
            }
        } else {
            *self
        }
    }

    /// The keyword used for this type in DDL.
    pub fn keyword(&self) -> &'static str {
        match self {
            SQLType::Text => "TEXT",
            SQLType::Varchar => "VARCHAR",
            SQLType::Integer => "INTEGER",
            SQLType::Real => "REAL",
            SQLType::Boolean => "BOOLEAN",
            SQLType::Timestamp => "TIMESTAMP",
            SQLType::Blob => "BLOB",
        }
    }
}

impl std::fmt::Display for SQLType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Whether an expression may evaluate to NULL.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullability {
    Never,
    Sometimes,
}

impl Nullability {
    pub fn is_nullable(&self) -> bool {
        matches!(self, Nullability::Sometimes)
    }

    /// `Sometimes` iff any of the operands is `Sometimes`. The rule for most operators.
    pub(crate) fn any<'a>(operands: impl IntoIterator<Item = &'a Nullability>) -> Nullability {
        if operands.into_iter().any(Nullability::is_nullable) {
            Nullability::Sometimes
        } else {
            Nullability::Never
        }
    }

    /// `Sometimes` iff all of the operands are `Sometimes`. The rule for COALESCE.
    pub(crate) fn all<'a>(operands: impl IntoIterator<Item = &'a Nullability>) -> Nullability {
        if operands.into_iter().all(Nullability::is_nullable) {
            Nullability::Sometimes
        } else {
            Nullability::Never
        }
    }
}
