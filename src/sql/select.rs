// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::database_error::DatabaseError;
use crate::schema::{DatabaseSpec, TableSpec};

use super::expr::{Expr, IntoExpr};
use super::order::{OrderBy, Ordering};
use super::sql_type::{Nullability, SQLType};
use super::{ExpressionBuilder, SQLBuilder};

/// The limit value meaning "no limit was set".
pub const NO_LIMIT: i64 = i64::MAX;

/// The join flavor of a non-base FROM entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    Cross,
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::LeftOuter => "LEFT JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A table reference inside a SELECT: an alias over a declared table, handing out
/// column-reference expressions with the type and nullability the schema declares.
#[derive(Debug, Clone)]
pub struct FromTable<'a> {
    alias: String,
    table: &'a TableSpec,
}

impl<'a> FromTable<'a> {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    /// A column-reference expression for the named column.
    pub fn col(&self, name: &str) -> Result<Expr, DatabaseError> {
        let column = self
            .table
            .column(name)
            .ok_or_else(|| DatabaseError::UnknownColumn {
                table: self.table.name.clone(),
                column: name.to_owned(),
            })?;
        Ok(Expr::column(
            self.alias.clone(),
            column.name.clone(),
            column.typ,
            column.nullability(),
        ))
    }
}

/// An ordered element of the FROM list. The base entry carries no join; every
/// subsequent entry carries a kind and an ON predicate.
#[derive(Debug, Clone)]
struct JoinEntry {
    table_name: String,
    alias: String,
    join: Option<(JoinKind, Expr)>,
}

/// A SELECT statement under construction: ordered projections, a join list, a
/// conjoined WHERE list, ORDER BY pairs, and limit/offset.
///
/// Mutating methods return `&mut Self` (or the fresh table reference) so clauses can
/// be chained; `to_sql` renders without consuming the builder.
#[derive(Debug, Clone)]
pub struct Select<'a> {
    database: &'a DatabaseSpec,
    projections: Vec<(String, Expr)>,
    joins: Vec<JoinEntry>,
    wheres: Vec<Expr>,
    order_by: Vec<(Expr, Ordering)>,
    limit: i64,
    offset: i64,
}

impl<'a> Select<'a> {
    pub(crate) fn new(database: &'a DatabaseSpec) -> Self {
        Self {
            database,
            projections: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            order_by: Vec::new(),
            limit: NO_LIMIT,
            offset: 0,
        }
    }

    /// Append a projection bound to `alias`, replacing any existing projection with the
    /// same alias.
    pub fn select(&mut self, alias: &str, value: impl IntoExpr) -> &mut Self {
        let value = value.into_expr();
        match self.projections.iter_mut().find(|(a, _)| a == alias) {
            Some((_, existing)) => *existing = value,
            None => self.projections.push((alias.to_owned(), value)),
        }
        self
    }

    /// Project a column reference under its own column name.
    pub fn pass_through(&mut self, column: &Expr) -> Result<&mut Self, DatabaseError> {
        let name = column.column_name().ok_or_else(|| {
            DatabaseError::Validation("pass_through requires a column reference".into())
        })?;
        Ok(self.select(&name.to_owned(), column))
    }

    /// Set the base table of the FROM clause and return its table reference. Joined
    /// tables are added with [`join`](Self::join).
    pub fn from(&mut self, alias: &str, table_name: &str) -> Result<FromTable<'a>, DatabaseError> {
        if !self.joins.is_empty() {
            return Err(DatabaseError::Validation(
                "the base table of this select is already set".into(),
            ));
        }
        let table = self.database.table(table_name)?;
        self.joins.push(JoinEntry {
            table_name: table.name.clone(),
            alias: alias.to_owned(),
            join: None,
        });
        Ok(FromTable {
            alias: alias.to_owned(),
            table,
        })
    }

    /// Append a joined table. The predicate builder receives the freshly-constructed
    /// table reference, so the join condition can mention both sides.
    pub fn join(
        &mut self,
        kind: JoinKind,
        alias: &str,
        table_name: &str,
        on: impl FnOnce(&FromTable<'a>) -> Result<Expr, DatabaseError>,
    ) -> Result<FromTable<'a>, DatabaseError> {
        if self.joins.is_empty() {
            return Err(DatabaseError::Validation(
                "a join requires a base table; call from() first".into(),
            ));
        }
        let table = self.database.table(table_name)?;
        let from_table = FromTable {
            alias: alias.to_owned(),
            table,
        };
        let predicate = on(&from_table)?.assert_boolean()?;
        self.joins.push(JoinEntry {
            table_name: table.name.clone(),
            alias: alias.to_owned(),
            join: Some((kind, predicate)),
        });
        Ok(from_table)
    }

    /// Append a predicate to the WHERE conjunction.
    pub fn r#where(&mut self, predicate: Expr) -> Result<&mut Self, DatabaseError> {
        self.wheres.push(predicate.assert_boolean()?);
        Ok(self)
    }

    pub fn order_by(&mut self, value: impl IntoExpr, ordering: Ordering) -> &mut Self {
        self.order_by.push((value.into_expr(), ordering));
        self
    }

    pub fn set_limit(&mut self, limit: i64) -> &mut Self {
        self.limit = limit;
        self
    }

    pub fn set_offset(&mut self, offset: i64) -> &mut Self {
        self.offset = offset;
        self
    }

    /// Adapt this SELECT as a scalar subquery expression. The declared type is that of
    /// the projection bound to `alias`; the result presence is not statically known, so
    /// the nullability is `Sometimes`.
    pub fn as_subquery(&self, alias: &str) -> Result<Expr, DatabaseError> {
        let (_, projection) = self
            .projections
            .iter()
            .find(|(a, _)| a == alias)
            .ok_or_else(|| DatabaseError::MissingProjection(alias.to_owned()))?;
        Ok(Expr::subquery(self.to_sql(), projection.typ()))
    }

    /// The declared type of the projection bound to `alias`, for callers that need the
    /// runtime row shape.
    pub fn projection_type(&self, alias: &str) -> Result<SQLType, DatabaseError> {
        self.projections
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, e)| e.typ())
            .ok_or_else(|| DatabaseError::MissingProjection(alias.to_owned()))
    }

    /// Render the statement. Clauses appear on their own lines; a SELECT with no
    /// projections renders as the stable sentinel `SELECT 1`.
    pub fn to_sql(&self) -> String {
        if self.projections.is_empty() {
            return "SELECT 1".to_owned();
        }

        let mut builder = SQLBuilder::new();

        builder.push_str("SELECT ");
        builder.push_iter(self.projections.iter(), ", ", |builder, (alias, value)| {
            value.build(false, builder);
            builder.push_str(" AS ");
            builder.push_str(alias);
        });

        if !self.joins.is_empty() {
            builder.push_str("\nFROM ");
            builder.push_iter(self.joins.iter(), " ", |builder, entry| {
                if let Some((kind, _)) = &entry.join {
                    builder.push_str(kind.keyword());
                    builder.push_space();
                }
                builder.push_str(&entry.table_name);
                builder.push_space();
                builder.push_str(&entry.alias);
                if let Some((_, predicate)) = &entry.join {
                    builder.push_str(" ON ");
                    predicate.build(true, builder);
                }
            });
        }

        if !self.wheres.is_empty() {
            builder.push_str("\nWHERE ");
            let nullability = Nullability::any(self.wheres.iter().map(Expr::nullability_ref));
            let conjunction =
                Expr::multi_op(SQLType::Boolean, " AND ", self.wheres.clone(), nullability);
            conjunction.build(false, &mut builder);
        }

        if !self.order_by.is_empty() {
            builder.push('\n');
            OrderBy(self.order_by.clone()).build(false, &mut builder);
        }

        if self.limit != NO_LIMIT {
            builder.push_str("\nLIMIT ");
            builder.push_str(self.limit.to_string());
            if self.offset > 0 {
                builder.push_str(" OFFSET ");
                builder.push_str(self.offset.to_string());
            }
        } else if self.offset > 0 {
            // SQLite reads LIMIT -1 as unlimited, which lets a bare offset take effect
            builder.push_str("\nLIMIT -1 OFFSET ");
            builder.push_str(self.offset.to_string());
        }

        builder.into_sql()
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::test_helper::user_database;
    use crate::sql::expr::expr;

    use super::*;

    #[test]
    fn projection_only() {
        let database = user_database();
        let mut select = database.select();
        select.select("foo", "bar");
        assert_eq!(select.to_sql(), "SELECT 'bar' AS foo");
    }

    #[test]
    fn no_projections_renders_sentinel() {
        let database = user_database();
        assert_eq!(database.select().to_sql(), "SELECT 1");

        // Other clauses do not leak past the sentinel
        let mut select = database.select();
        select.from("u", "user").unwrap();
        select.order_by("foo", Ordering::Asc).set_limit(3);
        assert_eq!(select.to_sql(), "SELECT 1");
    }

    #[test]
    fn replacing_a_projection_keeps_its_position() {
        let database = user_database();
        let mut select = database.select();
        select.select("foo", "bar").select("baz", 1i64).select("foo", "qux");
        assert_eq!(select.to_sql(), "SELECT 'qux' AS foo, 1 AS baz");
    }

    #[test]
    fn order_by_and_limit() {
        let database = user_database();
        let mut select = database.select();
        select
            .select("foo", "bar")
            .order_by("foo", Ordering::Asc)
            .order_by("bar", Ordering::Desc)
            .set_limit(10);
        assert_eq!(
            select.to_sql(),
            "SELECT 'bar' AS foo\nORDER BY 'foo' ASC, 'bar' DESC\nLIMIT 10"
        );
    }

    #[test]
    fn join_and_where() {
        let database = user_database();
        let mut select = database.select();

        let u1 = select.from("u1", "user").unwrap();
        let u2 = select
            .join(JoinKind::Inner, "u2", "user", |t| {
                Ok(t.col("login")?.eq(u1.col("login")?))
            })
            .unwrap();
        select.select("dup_login", u2.col("login").unwrap());
        select
            .r#where(u1.col("id").unwrap().ne(u2.col("id").unwrap()))
            .unwrap();

        assert_eq!(
            select.to_sql(),
            "SELECT u2.login AS dup_login\n\
             FROM user u1 JOIN user u2 ON (u2.login=u1.login)\n\
             WHERE u1.id!=u2.id"
        );
    }

    #[test]
    fn multiple_wheres_are_conjoined() {
        let database = user_database();
        let mut select = database.select();
        let u1 = select.from("u1", "user").unwrap();
        select.select("login", u1.col("login").unwrap());
        select.r#where(u1.col("id").unwrap().gt(10i64)).unwrap();
        select.r#where(u1.col("isAdmin").unwrap().eq(true)).unwrap();

        assert_eq!(
            select.to_sql(),
            "SELECT u1.login AS login\nFROM user u1\nWHERE (u1.id>10) AND (u1.isAdmin=1)"
        );
    }

    #[test]
    fn where_rejects_non_boolean() {
        let database = user_database();
        let mut select = database.select();
        let err = select.r#where(expr(1i64)).unwrap_err();
        assert!(matches!(err, DatabaseError::TypeMismatch { .. }));
    }

    #[test]
    fn in_subquery_scenario() {
        let database = user_database();

        let mut inner = database.select();
        inner.select("id", 123i64);
        let scalar = inner.as_subquery("id").unwrap();
        assert_eq!(scalar.typ(), SQLType::Integer);
        assert_eq!(scalar.nullability(), Nullability::Sometimes);

        let mut outer = database.select();
        outer.select("title", "hi");
        outer.r#where(expr(456i64).in_subquery(scalar)).unwrap();

        assert_eq!(
            outer.to_sql(),
            "SELECT 'hi' AS title\nWHERE 456 IN (SELECT 123 AS id)"
        );
    }

    #[test]
    fn as_subquery_requires_known_alias() {
        let database = user_database();
        let mut select = database.select();
        select.select("id", 1i64);
        let err = select.as_subquery("nope").unwrap_err();
        assert!(matches!(err, DatabaseError::MissingProjection(_)));
    }

    #[test]
    fn pass_through_projects_under_column_name() {
        let database = user_database();
        let mut select = database.select();
        let u1 = select.from("u1", "user").unwrap();
        let login = u1.col("login").unwrap();
        select.pass_through(&login).unwrap();
        assert_eq!(select.to_sql(), "SELECT u1.login AS login\nFROM user u1");
    }

    #[test]
    fn offset_requires_limit_or_falls_back() {
        let database = user_database();

        let mut with_both = database.select();
        with_both.select("foo", "bar").set_limit(10).set_offset(5);
        assert_eq!(
            with_both.to_sql(),
            "SELECT 'bar' AS foo\nLIMIT 10 OFFSET 5"
        );

        // A bare offset still takes effect through SQLite's unlimited LIMIT
        let mut bare_offset = database.select();
        bare_offset.select("foo", "bar").set_offset(5);
        assert_eq!(
            bare_offset.to_sql(),
            "SELECT 'bar' AS foo\nLIMIT -1 OFFSET 5"
        );
    }

    #[test]
    fn join_requires_base_table() {
        let database = user_database();
        let mut select = database.select();
        let err = select
            .join(JoinKind::Inner, "u2", "user", |t| {
                Ok(t.col("id")?.eq(1i64))
            })
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[test]
    fn column_handles_carry_schema_nullability() {
        let database = user_database();
        let mut select = database.select();
        let u1 = select.from("u1", "user").unwrap();

        assert_eq!(
            u1.col("apiKey").unwrap().nullability(),
            Nullability::Sometimes
        );
        assert_eq!(u1.col("login").unwrap().nullability(), Nullability::Never);

        let err = u1.col("nope").unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownColumn { .. }));
    }

    #[test]
    fn rendering_is_idempotent() {
        let database = user_database();
        let mut select = database.select();
        let u1 = select.from("u1", "user").unwrap();
        select.select("login", u1.col("login").unwrap());
        select.r#where(u1.col("id").unwrap().gt(1i64)).unwrap();

        assert_eq!(select.to_sql(), select.to_sql());
    }
}
