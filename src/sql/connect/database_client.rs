// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

use crate::database_error::DatabaseError;
use crate::schema::DatabaseSpec;
use crate::sql::select::Select;
use crate::sql::sql_value::{Row, SQLValue};

/// A table as reported by the database: its name and the SQL it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub sql: String,
}

/// An open SQLite database.
///
/// SQLite forbids concurrent use of a connection, so every driver call (including row
/// marshalling) runs inside a single async mutex. The mutex is FIFO-fair: concurrently
/// issued calls observe first-come-first-served order, and a caller aborted while
/// waiting never poisons the critical section.
pub struct DatabaseClient {
    conn: Mutex<rusqlite::Connection>,
}

/// Record a driver failure before surfacing it to the caller.
fn driver_error(e: rusqlite::Error) -> DatabaseError {
    error!("Failed to execute query: {e:?}");
    DatabaseError::Delegate(e)
}

impl DatabaseClient {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let conn = rusqlite::Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a query and marshal every result row into a name → value map.
    #[instrument(name = "DatabaseClient::query_all", skip_all)]
    pub async fn query_all(&self, sql: &str) -> Result<Vec<Row>, DatabaseError> {
        debug!("Executing SQL operation: {}", sql);

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(sql).map_err(driver_error)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let mut rows = stmt.query([]).map_err(driver_error)?;
        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(driver_error)? {
            let mut record = Row::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                let value: rusqlite::types::Value = row.get(i).map_err(driver_error)?;
                record.insert(name.clone(), SQLValue::from(value));
            }
            result.push(record);
        }
        Ok(result)
    }

    /// Run a query and return its first row, if any.
    #[instrument(name = "DatabaseClient::query_one", skip_all)]
    pub async fn query_one(&self, sql: &str) -> Result<Option<Row>, DatabaseError> {
        Ok(self.query_all(sql).await?.into_iter().next())
    }

    /// Run a query and return the values of one named result column.
    #[instrument(name = "DatabaseClient::query_column", skip_all)]
    pub async fn query_column(
        &self,
        sql: &str,
        column: &str,
    ) -> Result<Vec<SQLValue>, DatabaseError> {
        debug!("Executing SQL operation: {}", sql);

        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(sql).map_err(driver_error)?;
        let index = stmt
            .column_names()
            .iter()
            .position(|name| *name == column)
            .ok_or_else(|| {
                DatabaseError::Validation(format!("no result column named '{column}'"))
            })?;

        let mut rows = stmt.query([]).map_err(driver_error)?;
        let mut result = Vec::new();
        while let Some(row) = rows.next().map_err(driver_error)? {
            let value: rusqlite::types::Value = row.get(index).map_err(driver_error)?;
            result.push(SQLValue::from(value));
        }
        Ok(result)
    }

    /// Execute a statement, returning the number of affected rows.
    #[instrument(name = "DatabaseClient::execute", skip_all)]
    pub async fn execute(&self, sql: &str) -> Result<usize, DatabaseError> {
        debug!("Executing SQL operation: {}", sql);

        let conn = self.conn.lock().await;
        conn.execute(sql, []).map_err(driver_error)
    }

    /// Create the named table from its schema declaration.
    #[instrument(name = "DatabaseClient::create_table", skip_all)]
    pub async fn create_table(
        &self,
        database: &DatabaseSpec,
        table_name: &str,
        if_not_exists: bool,
    ) -> Result<(), DatabaseError> {
        let sql = database.create_table_sql(table_name, if_not_exists)?;
        self.execute(&sql).await?;
        Ok(())
    }

    /// Insert rows into the named table; a no-op for an empty row set.
    #[instrument(name = "DatabaseClient::insert", skip_all)]
    pub async fn insert(
        &self,
        database: &DatabaseSpec,
        table_name: &str,
        rows: &[Row],
    ) -> Result<(), DatabaseError> {
        let sql = database.insert_rows_sql(table_name, rows)?;
        if sql.is_empty() {
            return Ok(());
        }
        self.execute(&sql).await?;
        Ok(())
    }

    /// The tables present in the database, with the SQL each was created with.
    #[instrument(name = "DatabaseClient::get_tables", skip_all)]
    pub async fn get_tables(&self) -> Result<Vec<TableDefinition>, DatabaseError> {
        let rows = self
            .query_all("SELECT name, sql FROM sqlite_master WHERE type='table'")
            .await?;
        Ok(rows
            .into_iter()
            .map(|mut row| {
                let name = match row.remove("name") {
                    Some(SQLValue::Text(name)) => name,
                    _ => String::new(),
                };
                let sql = match row.remove("sql") {
                    Some(SQLValue::Text(sql)) => sql,
                    _ => String::new(),
                };
                TableDefinition { name, sql }
            })
            .collect())
    }

    /// Run a select builder and return all rows.
    #[instrument(name = "DatabaseClient::select_all", skip_all)]
    pub async fn select_all(&self, select: &Select<'_>) -> Result<Vec<Row>, DatabaseError> {
        self.query_all(&select.to_sql()).await
    }

    /// Run a select builder and return its first row, if any. The caller's builder is
    /// left untouched; the `LIMIT 1` is applied to a clone.
    #[instrument(name = "DatabaseClient::select_one", skip_all)]
    pub async fn select_one(&self, select: &Select<'_>) -> Result<Option<Row>, DatabaseError> {
        let mut limited = select.clone();
        limited.set_limit(1);
        self.query_one(&limited.to_sql()).await
    }

    /// Close the connection. Consuming `self` guarantees no call can still be queued on
    /// the mutex.
    #[instrument(name = "DatabaseClient::close", skip_all)]
    pub async fn close(self) -> Result<(), DatabaseError> {
        self.conn
            .into_inner()
            .close()
            .map_err(|(_, e)| driver_error(e))
    }
}
