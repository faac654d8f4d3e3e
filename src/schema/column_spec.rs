// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::sql::sql_type::{Nullability, SQLType};

/// A column in a declared table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub typ: SQLType,
    /// Is this column a part of the PK for the table
    pub is_pk: bool,
    /// Should this column have a NOT NULL constraint or not
    pub is_nullable: bool,
}

impl ColumnSpec {
    /// A non-nullable, non-PK column. Use [`nullable`](Self::nullable) and
    /// [`pk`](Self::pk) to adjust.
    pub fn new(name: impl Into<String>, typ: SQLType) -> Self {
        Self {
            name: name.into(),
            typ,
            is_pk: false,
            is_nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn pk(mut self) -> Self {
        self.is_pk = true;
        self
    }

    pub fn nullability(&self) -> Nullability {
        if self.is_nullable {
            Nullability::Sometimes
        } else {
            Nullability::Never
        }
    }

    /// The column's fragment of a CREATE TABLE statement, e.g. `id INTEGER NOT NULL
    /// PRIMARY KEY`.
    pub(super) fn creation_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.typ.keyword());
        if !self.is_nullable {
            sql.push_str(" NOT NULL");
        }
        if self.is_pk {
            sql.push_str(" PRIMARY KEY");
        }
        sql
    }
}
