// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A statically-typed SQL query builder and lightweight relational access layer for
//! SQLite.
//!
//! The core idea is the typed expression: every SQL fragment — a literal, a column
//! reference, an operator chain, a scalar subquery — is an [`Expr`] carrying its
//! declared [`SQLType`] and a [`Nullability`] classification, both fixed at
//! construction time. Type and nullability propagate through the operator
//! combinators (arithmetic promotes `INTEGER` to `REAL`, `COALESCE` is nullable only
//! when every operand is, and so on), so a well-typed tree renders to well-formed SQL.
//!
//! A [`DatabaseSpec`] declares tables and columns; it emits `CREATE TABLE` and
//! multi-row `INSERT` statements and hands out [`Select`] builders. A select builder
//! assembles projections, joins, WHERE conjunctions, ORDER BY, and LIMIT/OFFSET, and
//! renders with [`Select::to_sql`]; [`Select::as_subquery`] adapts a select as a
//! scalar expression for `IN (SELECT …)` and friends.
//!
//! The expression and builder layer only produces strings. Executing them is the job
//! of [`DatabaseClient`], an async facade over SQLite that serializes all driver
//! access through a per-connection mutex.

pub mod schema;
mod sql;

pub mod database_error;

/// Public types at the root level of this crate
pub use schema::{ColumnSpec, DatabaseSpec, TableSpec};

pub use sql::{
    connect::{DatabaseClient, TableDefinition},
    expr,
    first_type,
    ops,
    Expr,
    ExpressionBuilder,
    FromTable,
    IntoExpr,
    JoinKind,
    Literal,
    Nullability,
    Ordering,
    Row,
    SQLType,
    SQLValue,
    Select,
    NO_LIMIT,
};

pub use database_error::DatabaseError;
