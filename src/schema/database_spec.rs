// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::database_error::DatabaseError;
use crate::sql::select::Select;
use crate::sql::sql_value::Row;

use super::table_spec::TableSpec;

/// A declared database: a named set of tables. Immutable after construction; the SQL
/// emission services and the select builder hang off it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseSpec {
    pub name: String,
    pub tables: Vec<TableSpec>,
}

impl DatabaseSpec {
    pub fn new(name: impl Into<String>, tables: Vec<TableSpec>) -> Self {
        Self {
            name: name.into(),
            tables,
        }
    }

    pub fn table(&self, name: &str) -> Result<&TableSpec, DatabaseError> {
        self.tables
            .iter()
            .find(|table| table.name == name)
            .ok_or_else(|| DatabaseError::UnknownTable(name.to_owned()))
    }

    /// The CREATE TABLE statement for the named table.
    pub fn create_table_sql(
        &self,
        table_name: &str,
        if_not_exists: bool,
    ) -> Result<String, DatabaseError> {
        Ok(self.table(table_name)?.creation_sql(if_not_exists))
    }

    /// The multi-row INSERT statement for the named table; empty string for no rows.
    pub fn insert_rows_sql(&self, table_name: &str, rows: &[Row]) -> Result<String, DatabaseError> {
        self.table(table_name)?.insert_rows_sql(rows)
    }

    /// A select builder bound to this schema.
    pub fn select(&self) -> Select<'_> {
        Select::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::test_helper::user_database;

    use super::*;

    #[test]
    fn unknown_table_is_reported() {
        let database = user_database();
        let err = database.create_table_sql("nope", false).unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownTable(_)));
    }

    #[test]
    fn create_table_via_database() {
        let database = user_database();
        assert_eq!(
            database.create_table_sql("user", true).unwrap(),
            "CREATE TABLE IF NOT EXISTS user ( id INTEGER NOT NULL PRIMARY KEY, \
             login TEXT NOT NULL, apiKey TEXT, isAdmin BOOLEAN NOT NULL )"
        );
    }
}
