// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod connect;
pub mod expr;
pub mod literal;
pub mod ops;
pub mod order;
pub mod select;
pub mod sql_type;
pub mod sql_value;

pub use expression_builder::ExpressionBuilder;
pub(crate) use sql_builder::SQLBuilder;

pub use expr::{expr, first_type, Expr, IntoExpr};
pub use literal::Literal;
pub use order::Ordering;
pub use select::{FromTable, JoinKind, Select, NO_LIMIT};
pub use sql_type::{Nullability, SQLType};
pub use sql_value::{Row, SQLValue};

mod expression_builder;
mod sql_builder;
