// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};

use crate::database_error::DatabaseError;

use super::literal::Literal;
use super::sql_type::{Nullability, SQLType};
use super::sql_value::SQLValue;
use super::{ExpressionBuilder, SQLBuilder};

/// A SQL scalar or boolean expression, along with its declared type and nullability.
///
/// Expressions are pure values: constructed, composed, rendered, and discarded, with no
/// mutation after construction. The declared type is fixed at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    typ: SQLType,
    nullability: Nullability,
    kind: ExprKind,
}

/// The expression node set. Rendering for each variant lives in the
/// [`ExpressionBuilder`] impl below; the grouping discipline is the variant's own
/// business, driven by the `grouped` hint.
#[derive(Debug, Clone, PartialEq)]
enum ExprKind {
    /// A typed literal such as `'Sam'`, `42`, or a typed NULL.
    Literal(Literal),
    /// A column reference such as `u1.login`.
    Column { table_alias: String, name: String },
    /// `<expr> IS NULL` / `<expr> IS NOT NULL`.
    IsNull { negated: bool, operand: Box<Expr> },
    /// A prefix/suffix-wrapped operand such as `NOT (<expr>)`.
    Unary {
        prefix: &'static str,
        suffix: &'static str,
        operand: Box<Expr>,
    },
    /// An infix chain such as `a AND b AND c` or `a=b`.
    MultiOp {
        sep: &'static str,
        operands: Vec<Expr>,
    },
    /// A function call such as `COALESCE(a,b)` or `INSTR(s,sub)`.
    Function { name: &'static str, args: Vec<Expr> },
    /// `<lhs> IN(a,b,c)`.
    InList { lhs: Box<Expr>, list: Vec<Expr> },
    /// `<lhs> IN (SELECT …)`.
    InSubquery { lhs: Box<Expr>, subquery: Box<Expr> },
    /// `CASE WHEN … THEN … [ELSE …] END`.
    Case {
        branches: Vec<(Expr, Expr)>,
        else_branch: Option<Box<Expr>>,
    },
    /// A pre-rendered scalar SELECT, used as `(SELECT …)`.
    Subquery { sql: String },
}

impl Expr {
    pub fn typ(&self) -> SQLType {
        self.typ
    }

    pub fn nullability(&self) -> Nullability {
        self.nullability
    }

    pub(crate) fn nullability_ref(&self) -> &Nullability {
        &self.nullability
    }

    /// The column name, when this expression is a column reference.
    pub fn column_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Column { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn literal(literal: Literal) -> Expr {
        Expr {
            typ: literal.typ(),
            nullability: literal.nullability(),
            kind: ExprKind::Literal(literal),
        }
    }

    /// A typed NULL literal of the given type, nullability `Sometimes`.
    pub fn typed_null(typ: SQLType) -> Expr {
        Expr::literal(Literal::null(typ))
    }

    /// A reference to `<table_alias>.<name>`, with the type and nullability declared by
    /// the schema column.
    pub fn column(
        table_alias: impl Into<String>,
        name: impl Into<String>,
        typ: SQLType,
        nullability: Nullability,
    ) -> Expr {
        Expr {
            typ,
            nullability,
            kind: ExprKind::Column {
                table_alias: table_alias.into(),
                name: name.into(),
            },
        }
    }

    /// Wrap a pre-rendered scalar SELECT as an expression of the given type. The result
    /// presence is not statically known, so the nullability is `Sometimes`.
    pub fn subquery(sql: impl Into<String>, typ: SQLType) -> Expr {
        Expr {
            typ,
            nullability: Nullability::Sometimes,
            kind: ExprKind::Subquery { sql: sql.into() },
        }
    }

    pub(crate) fn unary(
        prefix: &'static str,
        suffix: &'static str,
        operand: Expr,
        typ: SQLType,
        nullability: Nullability,
    ) -> Expr {
        Expr {
            typ,
            nullability,
            kind: ExprKind::Unary {
                prefix,
                suffix,
                operand: Box::new(operand),
            },
        }
    }

    pub(crate) fn multi_op(
        typ: SQLType,
        sep: &'static str,
        operands: Vec<Expr>,
        nullability: Nullability,
    ) -> Expr {
        Expr {
            typ,
            nullability,
            kind: ExprKind::MultiOp { sep, operands },
        }
    }

    pub(crate) fn function(
        typ: SQLType,
        name: &'static str,
        args: Vec<Expr>,
        nullability: Nullability,
    ) -> Expr {
        Expr {
            typ,
            nullability,
            kind: ExprKind::Function { name, args },
        }
    }

    pub(crate) fn case(
        typ: SQLType,
        branches: Vec<(Expr, Expr)>,
        else_branch: Option<Expr>,
        nullability: Nullability,
    ) -> Expr {
        Expr {
            typ,
            nullability,
            kind: ExprKind::Case {
                branches,
                else_branch: else_branch.map(Box::new),
            },
        }
    }

    // ------------------------------------------------------------------
    // Comparisons. The result is BOOLEAN; a typed NULL on either side only
    // affects nullability.
    // ------------------------------------------------------------------

    fn comparison(self, rhs: Expr, op: &'static str) -> Expr {
        let nullability = Nullability::any([&self.nullability, &rhs.nullability]);
        Expr::multi_op(SQLType::Boolean, op, vec![self, rhs], nullability)
    }

    pub fn eq(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), "=")
    }

    pub fn ne(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), "!=")
    }

    pub fn lt(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), "<")
    }

    pub fn le(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), "<=")
    }

    pub fn gt(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), ">")
    }

    pub fn ge(self, rhs: impl IntoExpr) -> Expr {
        self.comparison(rhs.into_expr(), ">=")
    }

    // ------------------------------------------------------------------
    // Arithmetic. Both operands must be numeric; REAL dominates INTEGER, and
    // division is always REAL.
    // ------------------------------------------------------------------

    fn arithmetic(
        self,
        rhs: Expr,
        op: &'static str,
        result: Option<SQLType>,
    ) -> Result<Expr, DatabaseError> {
        let lhs = self.assert_numeric()?;
        let rhs = rhs.assert_numeric()?;
        let typ = result.unwrap_or_else(|| lhs.typ.promote(rhs.typ));
        let nullability = Nullability::any([&lhs.nullability, &rhs.nullability]);
        Ok(Expr::multi_op(typ, op, vec![lhs, rhs], nullability))
    }

    pub fn add(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        self.arithmetic(rhs.into_expr(), "+", None)
    }

    pub fn sub(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        self.arithmetic(rhs.into_expr(), "-", None)
    }

    pub fn mul(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        self.arithmetic(rhs.into_expr(), "*", None)
    }

    pub fn div(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        self.arithmetic(rhs.into_expr(), "/", Some(SQLType::Real))
    }

    // ------------------------------------------------------------------
    // Boolean combinators
    // ------------------------------------------------------------------

    pub fn and(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        super::ops::and(vec![self, rhs.into_expr()])
    }

    pub fn or(self, rhs: impl IntoExpr) -> Result<Expr, DatabaseError> {
        super::ops::or(vec![self, rhs.into_expr()])
    }

    pub fn not(self) -> Result<Expr, DatabaseError> {
        super::ops::not(self)
    }

    // ------------------------------------------------------------------
    // NULL tests, IN, and string containment
    // ------------------------------------------------------------------

    pub fn is_null(self) -> Expr {
        Expr {
            typ: SQLType::Boolean,
            nullability: Nullability::Never,
            kind: ExprKind::IsNull {
                negated: false,
                operand: Box::new(self),
            },
        }
    }

    pub fn is_not_null(self) -> Expr {
        Expr {
            typ: SQLType::Boolean,
            nullability: Nullability::Never,
            kind: ExprKind::IsNull {
                negated: true,
                operand: Box::new(self),
            },
        }
    }

    /// `<self> IN(a,b,c)`. The result never evaluates to NULL.
    pub fn in_list<I, V>(self, list: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: IntoExpr,
    {
        Expr {
            typ: SQLType::Boolean,
            nullability: Nullability::Never,
            kind: ExprKind::InList {
                lhs: Box::new(self),
                list: list.into_iter().map(IntoExpr::into_expr).collect(),
            },
        }
    }

    /// `<self> IN (SELECT …)`, with a scalar subquery built by
    /// [`Select::as_subquery`](super::select::Select::as_subquery).
    pub fn in_subquery(self, subquery: Expr) -> Expr {
        Expr {
            typ: SQLType::Boolean,
            nullability: Nullability::Never,
            kind: ExprKind::InSubquery {
                lhs: Box::new(self),
                subquery: Box::new(subquery),
            },
        }
    }

    /// String containment, rendered as `INSTR(self,needle)`. The receiver must be
    /// textual.
    pub fn includes(self, needle: impl IntoExpr) -> Result<Expr, DatabaseError> {
        let lhs = self.assert_text()?;
        let needle = needle.into_expr();
        let nullability = Nullability::any([&lhs.nullability, &needle.nullability]);
        Ok(Expr::function(
            SQLType::Boolean,
            "INSTR",
            vec![lhs, needle],
            nullability,
        ))
    }

    // ------------------------------------------------------------------
    // Type assertions
    // ------------------------------------------------------------------

    pub fn assert_boolean(self) -> Result<Expr, DatabaseError> {
        if self.typ == SQLType::Boolean {
            Ok(self)
        } else {
            Err(DatabaseError::type_mismatch("a BOOLEAN operand", self.typ))
        }
    }

    pub fn assert_text(self) -> Result<Expr, DatabaseError> {
        if self.typ.is_textual() {
            Ok(self)
        } else {
            Err(DatabaseError::type_mismatch("a textual operand", self.typ))
        }
    }

    pub fn assert_numeric(self) -> Result<Expr, DatabaseError> {
        if self.typ.is_numeric() {
            Ok(self)
        } else {
            Err(DatabaseError::type_mismatch("a numeric operand", self.typ))
        }
    }

    /// Render this expression to its SQL text.
    pub fn to_sql(&self) -> String {
        self.to_sql_grouped(false)
    }
}

impl ExpressionBuilder for Expr {
    fn build(&self, grouped: bool, builder: &mut SQLBuilder) {
        match &self.kind {
            ExprKind::Literal(literal) => literal.build(grouped, builder),
            ExprKind::Column { table_alias, name } => builder.push_column(table_alias, name),
            ExprKind::IsNull { negated, operand } => {
                operand.build(true, builder);
                builder.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            ExprKind::Unary {
                prefix,
                suffix,
                operand,
            } => {
                if grouped {
                    builder.push('(');
                }
                builder.push_str(prefix);
                operand.build(false, builder);
                builder.push_str(suffix);
                if grouped {
                    builder.push(')');
                }
            }
            ExprKind::MultiOp { sep, operands } => match operands.as_slice() {
                // Degenerate single-operand chain: the operand alone, with the outer
                // grouping only
                [operand] => operand.build(grouped, builder),
                _ => {
                    if grouped {
                        builder.push('(');
                    }
                    builder.push_iter(operands.iter(), sep, |builder, operand| {
                        operand.build(true, builder);
                    });
                    if grouped {
                        builder.push(')');
                    }
                }
            },
            ExprKind::Function { name, args } => {
                builder.push_str(name);
                builder.push('(');
                builder.push_iter(args.iter(), ",", |builder, arg| {
                    arg.build(false, builder);
                });
                builder.push(')');
            }
            ExprKind::InList { lhs, list } => {
                lhs.build(true, builder);
                builder.push_str(" IN(");
                builder.push_iter(list.iter(), ",", |builder, item| {
                    item.build(false, builder);
                });
                builder.push(')');
            }
            ExprKind::InSubquery { lhs, subquery } => {
                lhs.build(true, builder);
                builder.push_str(" IN ");
                subquery.build(false, builder);
            }
            ExprKind::Case {
                branches,
                else_branch,
            } => {
                builder.push_str("CASE");
                for (when, then) in branches {
                    builder.push_str(" WHEN ");
                    when.build(false, builder);
                    builder.push_str(" THEN ");
                    then.build(false, builder);
                }
                if let Some(else_branch) = else_branch {
                    builder.push_str(" ELSE ");
                    else_branch.build(false, builder);
                }
                builder.push_str(" END");
            }
            ExprKind::Subquery { sql } => {
                builder.push('(');
                builder.push_str(sql);
                builder.push(')');
            }
        }
    }
}

/// Coercion of native values (and expressions themselves) into expression nodes, with
/// the SQL type inferred from the native kind.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

impl IntoExpr for &str {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Text, SQLValue::from(self)))
    }
}

impl IntoExpr for String {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Text, SQLValue::from(self)))
    }
}

impl IntoExpr for i64 {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Integer, SQLValue::from(self)))
    }
}

impl IntoExpr for i32 {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Integer, SQLValue::from(self)))
    }
}

impl IntoExpr for f64 {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Real, SQLValue::from(self)))
    }
}

impl IntoExpr for bool {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Boolean, SQLValue::from(self)))
    }
}

impl IntoExpr for DateTime<Utc> {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(
            SQLType::Timestamp,
            SQLValue::from(self),
        ))
    }
}

impl IntoExpr for Vec<u8> {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Blob, SQLValue::from(self)))
    }
}

impl IntoExpr for &[u8] {
    fn into_expr(self) -> Expr {
        Expr::literal(Literal::from_native(SQLType::Blob, SQLValue::from(self)))
    }
}

/// Coerce a native value to an expression. Sugar for the [`IntoExpr`] conversions.
pub fn expr(value: impl IntoExpr) -> Expr {
    value.into_expr()
}

/// The dynamic counterpart of [`expr`]: a bare `Null` has no inferable type and is
/// rejected.
impl TryFrom<SQLValue> for Expr {
    type Error = DatabaseError;

    fn try_from(value: SQLValue) -> Result<Expr, DatabaseError> {
        match value.type_of() {
            Some(typ) => Ok(Expr::literal(Literal::from_native(typ, value))),
            None => Err(DatabaseError::InvalidLiteral(
                "a bare NULL has no inferable type; use a typed null literal".into(),
            )),
        }
    }
}

/// The declared type of the first expression in the sequence, if any.
pub fn first_type<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Option<SQLType> {
    exprs.into_iter().next().map(Expr::typ)
}
