// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::sql::sql_type::SQLType;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: SQLType },

    #[error("No projection named '{0}' in this select")]
    MissingProjection(String),

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Delegate: {0}")]
    Delegate(#[from] rusqlite::Error),
}

impl DatabaseError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, actual: SQLType) -> Self {
        DatabaseError::TypeMismatch {
            expected: expected.into(),
            actual,
        }
    }
}
