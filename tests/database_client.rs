// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use exo_sqlite::{
    ColumnSpec, DatabaseClient, DatabaseSpec, Row, SQLType, SQLValue, TableSpec,
};

fn user_database() -> DatabaseSpec {
    DatabaseSpec::new(
        "test",
        vec![TableSpec::new(
            "user",
            vec![
                ColumnSpec::new("id", SQLType::Integer).pk(),
                ColumnSpec::new("login", SQLType::Text),
                ColumnSpec::new("apiKey", SQLType::Text).nullable(),
                ColumnSpec::new("isAdmin", SQLType::Boolean),
            ],
        )],
    )
}

fn user_row(id: i64, login: &str, is_admin: bool) -> Row {
    Row::from([
        ("id".to_owned(), SQLValue::Integer(id)),
        ("login".to_owned(), SQLValue::Text(login.to_owned())),
        ("apiKey".to_owned(), SQLValue::Null),
        ("isAdmin".to_owned(), SQLValue::Boolean(is_admin)),
    ])
}

async fn seeded_client(database: &DatabaseSpec) -> DatabaseClient {
    let client = DatabaseClient::open_in_memory().unwrap();
    client.create_table(database, "user", true).await.unwrap();
    client
        .insert(
            database,
            "user",
            &[user_row(1, "alice", true), user_row(2, "bob", false)],
        )
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn create_insert_select_round_trip() {
    let database = user_database();
    let client = seeded_client(&database).await;

    let mut select = database.select();
    let u = select.from("u", "user").unwrap();
    select.select("login", u.col("login").unwrap());
    select
        .r#where(u.col("isAdmin").unwrap().eq(true))
        .unwrap();

    let rows = client.select_all(&select).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("login"),
        Some(&SQLValue::Text("alice".to_owned()))
    );
}

#[tokio::test]
async fn null_columns_round_trip() {
    let database = user_database();
    let client = seeded_client(&database).await;

    let rows = client
        .query_all("SELECT apiKey FROM user")
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.get("apiKey") == Some(&SQLValue::Null)));
}

#[tokio::test]
async fn query_one_and_query_column() {
    let database = user_database();
    let client = seeded_client(&database).await;

    let row = client
        .query_one("SELECT login FROM user ORDER BY id ASC")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.get("login"), Some(&SQLValue::Text("alice".to_owned())));

    let logins = client
        .query_column("SELECT login FROM user ORDER BY id ASC", "login")
        .await
        .unwrap();
    assert_eq!(
        logins,
        vec![
            SQLValue::Text("alice".to_owned()),
            SQLValue::Text("bob".to_owned())
        ]
    );

    let none = client
        .query_one("SELECT login FROM user WHERE id=99")
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn select_one_leaves_builder_untouched() {
    let database = user_database();
    let client = seeded_client(&database).await;

    let mut select = database.select();
    let u = select.from("u", "user").unwrap();
    select.select("login", u.col("login").unwrap());
    let sql_before = select.to_sql();

    let row = client.select_one(&select).await.unwrap();
    assert!(row.is_some());
    assert_eq!(select.to_sql(), sql_before);
}

#[tokio::test]
async fn get_tables_reports_creation_sql() {
    let database = user_database();
    let client = seeded_client(&database).await;

    let tables = client.get_tables().await.unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "user");
    assert!(tables[0].sql.contains("CREATE TABLE"));
    assert!(tables[0].sql.contains("login TEXT NOT NULL"));
}

#[tokio::test]
async fn empty_insert_is_a_no_op() {
    let database = user_database();
    let client = DatabaseClient::open_in_memory().unwrap();
    client.create_table(&database, "user", false).await.unwrap();

    client.insert(&database, "user", &[]).await.unwrap();

    let rows = client.query_all("SELECT id FROM user").await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_are_serialized() {
    let database = user_database();
    let client = Arc::new(DatabaseClient::open_in_memory().unwrap());
    client.create_table(&database, "user", true).await.unwrap();

    let mut handles = Vec::new();
    for id in 0..16i64 {
        let client = client.clone();
        let database = database.clone();
        handles.push(tokio::spawn(async move {
            client
                .insert(&database, "user", &[user_row(id, &format!("user{id}"), false)])
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let ids = client
        .query_column("SELECT id FROM user ORDER BY id ASC", "id")
        .await
        .unwrap();
    assert_eq!(ids.len(), 16);
}

#[tokio::test]
async fn close_consumes_the_client() {
    let client = DatabaseClient::open_in_memory().unwrap();
    client.close().await.unwrap();
}
