//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

// Tables and columns //

/// Refer to a table by name. A `schema.table` name is split into its parts.
pub fn make_table_reference(name: &str) -> TableReference {
    match name.split_once('.') {
        Some((schema, table)) => TableReference::DBTable {
            schema: Some(SchemaName(schema.to_string())),
            table: TableName(table.to_string()),
        },
        None => TableReference::DBTable {
            schema: None,
            table: TableName(name.to_string()),
        },
    }
}

/// Refer to a column of the queried table.
pub fn make_column(name: &str) -> Expression {
    Expression::ColumnReference(ColumnName(name.to_string()))
}

// Boolean composition //

/// Join expressions with `AND`. `None` when there is nothing to join.
pub fn conjunction(expressions: Vec<Expression>) -> Option<Expression> {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
}

/// Join expressions with `OR`. `None` when there is nothing to join.
pub fn disjunction(expressions: Vec<Expression>) -> Option<Expression> {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        })
}

/// Add a predicate to a `WHERE` expression, dropping the empty `true`.
pub fn and_where(current: Expression, predicate: Expression) -> Expression {
    if current == true_expr() {
        predicate
    } else {
        Expression::And {
            left: Box::new(current),
            right: Box::new(predicate),
        }
    }
}

// SELECTs //

/// Build a simple `SELECT *` from a table and the rest are empty.
pub fn star_select(from: From) -> Select {
    Select {
        from,
        where_: Where(empty_where()),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}
