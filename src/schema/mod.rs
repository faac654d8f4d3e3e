// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Declarative table and column definitions, and the SQL emission services built on
//! them (CREATE TABLE, multi-row INSERT, and the select builder entry point).

mod column_spec;
mod database_spec;
mod table_spec;

#[cfg(test)]
pub(crate) mod test_helper;

pub use column_spec::ColumnSpec;
pub use database_spec::DatabaseSpec;
pub use table_spec::TableSpec;
