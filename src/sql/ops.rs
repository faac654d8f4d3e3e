// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Free n-ary combinators over expressions. The receiver-style methods on
//! [`Expr`] are sugar for two-operand forms of these.

use crate::database_error::DatabaseError;

use super::expr::Expr;
use super::sql_type::{Nullability, SQLType};

/// `b1 AND b2 AND …`. All operands must be BOOLEAN. The single-operand form renders as
/// the operand alone, without the keyword or parentheses.
pub fn and(operands: Vec<Expr>) -> Result<Expr, DatabaseError> {
    boolean_chain(operands, " AND ")
}

/// `b1 OR b2 OR …`. All operands must be BOOLEAN. The single-operand form renders as
/// the operand alone, without the keyword or parentheses.
pub fn or(operands: Vec<Expr>) -> Result<Expr, DatabaseError> {
    boolean_chain(operands, " OR ")
}

fn boolean_chain(operands: Vec<Expr>, sep: &'static str) -> Result<Expr, DatabaseError> {
    if operands.is_empty() {
        return Err(DatabaseError::Validation(format!(
            "{} requires at least one operand",
            sep.trim()
        )));
    }
    let operands = operands
        .into_iter()
        .map(Expr::assert_boolean)
        .collect::<Result<Vec<_>, _>>()?;
    let nullability = Nullability::any(operands.iter().map(Expr::nullability_ref));
    Ok(Expr::multi_op(SQLType::Boolean, sep, operands, nullability))
}

/// `NOT (b)`.
pub fn not(operand: Expr) -> Result<Expr, DatabaseError> {
    let operand = operand.assert_boolean()?;
    let nullability = operand.nullability();
    Ok(Expr::unary("NOT (", ")", operand, SQLType::Boolean, nullability))
}

/// `t1||t2||…`, type TEXT. All operands must be textual.
pub fn concat(operands: Vec<Expr>) -> Result<Expr, DatabaseError> {
    if operands.is_empty() {
        return Err(DatabaseError::Validation(
            "CONCAT requires at least one operand".into(),
        ));
    }
    let operands = operands
        .into_iter()
        .map(Expr::assert_text)
        .collect::<Result<Vec<_>, _>>()?;
    let nullability = Nullability::any(operands.iter().map(Expr::nullability_ref));
    Ok(Expr::multi_op(SQLType::Text, "||", operands, nullability))
}

/// `COALESCE(a1,a2,…)`. The result carries the first operand's declared type, and is
/// nullable only when every operand is.
pub fn coalesce(operands: Vec<Expr>) -> Result<Expr, DatabaseError> {
    let typ = match operands.first() {
        Some(first) => first.typ(),
        None => {
            return Err(DatabaseError::Validation(
                "COALESCE requires at least one operand".into(),
            ))
        }
    };
    let nullability = Nullability::all(operands.iter().map(Expr::nullability_ref));
    Ok(Expr::function(typ, "COALESCE", operands, nullability))
}

/// `CASE WHEN w1 THEN t1 … [ELSE e] END`. Every `when` must be BOOLEAN; the thens and
/// the else must share a common type, which becomes the result type. Without an ELSE
/// the result is always nullable; with one, it is nullable iff any branch is.
pub fn case(
    branches: Vec<(Expr, Expr)>,
    else_branch: Option<Expr>,
) -> Result<Expr, DatabaseError> {
    let mut typ = match branches.first() {
        Some((_, then)) => then.typ(),
        None => {
            return Err(DatabaseError::Validation(
                "CASE requires at least one WHEN branch".into(),
            ))
        }
    };

    let branches = branches
        .into_iter()
        .map(|(when, then)| Ok((when.assert_boolean()?, then)))
        .collect::<Result<Vec<_>, DatabaseError>>()?;

    for then in branches
        .iter()
        .map(|(_, then)| then)
        .chain(else_branch.iter())
    {
        if !typ.is_compatible_with(then.typ()) {
            return Err(DatabaseError::type_mismatch(typ.to_string(), then.typ()));
        }
        typ = typ.promote(then.typ());
    }

    let nullability = match &else_branch {
        None => Nullability::Sometimes,
        Some(else_branch) => Nullability::any(
            branches
                .iter()
                .map(|(_, then)| then.nullability_ref())
                .chain([else_branch.nullability_ref()]),
        ),
    };

    Ok(Expr::case(typ, branches, else_branch, nullability))
}
