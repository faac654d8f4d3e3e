// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::expr::Expr;
use super::{ExpressionBuilder, SQLBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum Ordering {
    Asc,
    Desc,
}

impl Ordering {
    fn keyword(&self) -> &'static str {
        match self {
            Ordering::Asc => "ASC",
            Ordering::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause: ordered `(expression, direction)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy(pub Vec<(Expr, Ordering)>);

impl ExpressionBuilder for OrderBy {
    fn build(&self, _grouped: bool, builder: &mut SQLBuilder) {
        builder.push_str("ORDER BY ");
        builder.push_iter(self.0.iter(), ", ", |builder, (expr, ordering)| {
            expr.build(false, builder);
            builder.push_space();
            builder.push_str(ordering.keyword());
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::expr::expr;

    use super::*;

    #[test]
    fn single() {
        let order_by = OrderBy(vec![(expr("foo"), Ordering::Asc)]);
        assert_eq!(order_by.to_sql_grouped(false), "ORDER BY 'foo' ASC");
    }

    #[test]
    fn multiple() {
        let order_by = OrderBy(vec![
            (expr("foo"), Ordering::Asc),
            (expr("bar"), Ordering::Desc),
        ]);
        assert_eq!(
            order_by.to_sql_grouped(false),
            "ORDER BY 'foo' ASC, 'bar' DESC"
        );
    }
}
