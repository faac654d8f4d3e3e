// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![cfg(test)]

use crate::sql::sql_type::SQLType;

use super::column_spec::ColumnSpec;
use super::database_spec::DatabaseSpec;
use super::table_spec::TableSpec;

/// The `user` table used across the test suite.
pub fn user_table() -> TableSpec {
    TableSpec::new(
        "user",
        vec![
            ColumnSpec::new("id", SQLType::Integer).pk(),
            ColumnSpec::new("login", SQLType::Text),
            ColumnSpec::new("apiKey", SQLType::Text).nullable(),
            ColumnSpec::new("isAdmin", SQLType::Boolean),
        ],
    )
}

pub fn user_database() -> DatabaseSpec {
    DatabaseSpec::new("test", vec![user_table()])
}
