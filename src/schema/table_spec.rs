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
use crate::sql::literal::Literal;
use crate::sql::sql_value::{Row, SQLValue};
use crate::sql::{ExpressionBuilder, SQLBuilder};

use super::column_spec::ColumnSpec;

/// A declared table: a named, ordered set of columns. The declaration order is
/// significant; CREATE TABLE layout and INSERT column lists follow it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// The CREATE TABLE statement for this table.
    pub(super) fn creation_sql(&self, if_not_exists: bool) -> String {
        let column_stmts = self
            .columns
            .iter()
            .map(|column| column.creation_sql())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "CREATE TABLE {}{} ( {} )",
            if if_not_exists { "IF NOT EXISTS " } else { "" },
            self.name,
            column_stmts
        )
    }

    /// The multi-row INSERT statement for this table, or an empty string when there are
    /// no rows. Row fields are looked up by column name; missing or `Null` fields
    /// become `NULL`, and every tuple follows the schema's column order.
    pub(super) fn insert_rows_sql(&self, rows: &[Row]) -> Result<String, DatabaseError> {
        if rows.is_empty() {
            return Ok(String::new());
        }

        let mut builder = SQLBuilder::new();
        builder.push_str("INSERT INTO ");
        builder.push_str(&self.name);
        builder.push_str(" (");
        builder.push_iter(self.columns.iter(), ",", |builder, column| {
            builder.push_str(&column.name);
        });
        builder.push_str(") VALUES");

        for (i, row) in rows.iter().enumerate() {
            builder.push_str(if i == 0 { "\n(" } else { ",\n(" });
            let values = self
                .columns
                .iter()
                .map(|column| {
                    let value = row.get(&column.name).cloned().unwrap_or(SQLValue::Null);
                    Literal::new(column.typ, value)
                })
                .collect::<Result<Vec<_>, _>>()?;
            builder.push_iter(values.iter(), ",", |builder, literal| {
                literal.build(false, builder);
            });
            builder.push(')');
        }

        Ok(builder.into_sql())
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::test_helper::user_table;
    use crate::sql::sql_type::SQLType;

    use super::*;

    #[test]
    fn create_table_follows_declaration_order() {
        let table = user_table();
        assert_eq!(
            table.creation_sql(true),
            "CREATE TABLE IF NOT EXISTS user ( id INTEGER NOT NULL PRIMARY KEY, \
             login TEXT NOT NULL, apiKey TEXT, isAdmin BOOLEAN NOT NULL )"
        );
        assert_eq!(
            table.creation_sql(false),
            "CREATE TABLE user ( id INTEGER NOT NULL PRIMARY KEY, login TEXT NOT NULL, \
             apiKey TEXT, isAdmin BOOLEAN NOT NULL )"
        );
    }

    #[test]
    fn insert_rows_follow_schema_order() {
        let table = user_table();

        // Field order in the row data is deliberately scrambled
        let row1 = Row::from([
            ("isAdmin".to_owned(), SQLValue::Boolean(true)),
            ("id".to_owned(), SQLValue::Integer(123)),
            ("apiKey".to_owned(), SQLValue::Null),
            ("login".to_owned(), SQLValue::Text("myname".to_owned())),
        ]);
        let row2 = Row::from([
            ("id".to_owned(), SQLValue::Integer(321)),
            ("login".to_owned(), SQLValue::Text("yourname".to_owned())),
            ("isAdmin".to_owned(), SQLValue::Boolean(false)),
        ]);

        assert_eq!(
            table.insert_rows_sql(&[row1, row2]).unwrap(),
            "INSERT INTO user (id,login,apiKey,isAdmin) VALUES\n\
             (123,'myname',NULL,1),\n\
             (321,'yourname',NULL,0)"
        );
    }

    #[test]
    fn insert_with_no_rows_is_empty() {
        let table = user_table();
        assert_eq!(table.insert_rows_sql(&[]).unwrap(), "");
    }

    #[test]
    fn insert_rejects_mismatched_value() {
        let table = user_table();
        let row = Row::from([("id".to_owned(), SQLValue::Text("oops".to_owned()))]);
        let err = table.insert_rows_sql(&[row]).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidLiteral(_)));
    }

    #[test]
    fn column_lookup() {
        let table = user_table();
        assert_eq!(table.column("login").map(|c| c.typ), Some(SQLType::Text));
        assert!(table.column("nope").is_none());
    }
}
