// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub struct SQLBuilder {
    /// The SQL being built. Literal values are inlined, so there is no
    /// accompanying parameter list.
    sql: String,
}

impl SQLBuilder {
    pub fn new() -> Self {
        Self { sql: String::new() }
    }

    /// Push a string
    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.sql.push_str(s.as_ref());
    }

    /// Push a character
    pub fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Push a column reference as `<table_alias>.<column_name>`. Identifiers are
    /// emitted unquoted; schema names must not use reserved words.
    pub fn push_column<T: AsRef<str>>(&mut self, table_alias: T, column_name: T) {
        self.push_str(table_alias);
        self.push('.');
        self.push_str(column_name);
    }

    /// Push a space. This is a common operation, so it is provided as a separate method.
    pub fn push_space(&mut self) {
        self.sql.push(' ');
    }

    /// Push elements of an iterator, separated by `sep`. The `push_elem` function provides
    /// the flexibility to map the elements.
    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        push_elem: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            push_elem(self, item);

            if i < len - 1 {
                self.sql.push_str(sep);
            }
        }
    }

    /// Get the SQL string. Calling this method should be the final step in building an
    /// SQL expression, and thus this builder consumes the `self`.
    pub fn into_sql(self) -> String {
        self.sql
    }
}

impl Default for SQLBuilder {
    fn default() -> Self {
        Self::new()
    }
}
