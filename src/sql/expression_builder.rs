// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::SQLBuilder;

/// A trait for types that can build themselves into an SQL expression.
///
/// Each constituent of an SQL expression (literal, column reference, operator chain,
/// select, etc.) implements this trait, which can then be used to hierarchically build
/// an SQL string.
///
/// The `grouped` hint asks the expression to wrap itself in parentheses unless it is
/// already syntactically atomic. Each node decides for itself whether it is atomic;
/// literals, column references, function calls, and other self-bounded phrases ignore
/// the hint.
pub trait ExpressionBuilder {
    /// Build the SQL expression into the given SQL builder
    fn build(&self, grouped: bool, builder: &mut SQLBuilder);

    /// Build the SQL expression into a string. This is useful for testing/debugging,
    /// where we want to assert on the generated SQL without going through the whole
    /// process of creating an SQLBuilder, building the expression into it, and finally
    /// extracting the SQL string.
    fn to_sql_grouped(&self, grouped: bool) -> String
    where
        Self: Sized,
    {
        let mut builder = SQLBuilder::new();
        self.build(grouped, &mut builder);
        builder.into_sql()
    }
}

impl<T> ExpressionBuilder for Box<T>
where
    T: ExpressionBuilder,
{
    fn build(&self, grouped: bool, builder: &mut SQLBuilder) {
        self.as_ref().build(grouped, builder)
    }
}

impl<T> ExpressionBuilder for &T
where
    T: ExpressionBuilder,
{
    fn build(&self, grouped: bool, builder: &mut SQLBuilder) {
        (**self).build(grouped, builder)
    }
}
