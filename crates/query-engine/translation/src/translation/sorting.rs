//! Convert the order entries of a request to sort terms.

use datagrid_models::GridRequest;
use query_engine_metadata::metadata::ColumnSpec;
use query_engine_sql::sql;

use super::backend::{Backend, InFlightQuery};
use super::resolution::ColumnResolution;

/// One column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm<'a> {
    pub column: &'a ColumnSpec,
    pub direction: sql::ast::OrderByDirection,
}

/// Compute the sort terms of a request and hand them to the backend.
pub fn translate_order<B: Backend>(
    backend: &B,
    in_flight: &mut InFlightQuery<B::Query>,
    request: &GridRequest,
    resolution: &ColumnResolution<'_>,
) {
    let terms = collect_order(request, resolution);
    in_flight.order = backend.apply_order(&mut in_flight.query, &terms);
}

/// Sort terms in request order. Entries pointing outside the request's columns, at
/// columns that are not orderable, unresolved, or before the start column are dropped.
pub fn collect_order<'a>(
    request: &GridRequest,
    resolution: &ColumnResolution<'a>,
) -> Vec<OrderTerm<'a>> {
    request
        .order
        .iter()
        .filter_map(|order| {
            let request_column = request.columns.get(order.column)?;
            if !request_column.is_orderable() {
                return None;
            }
            let column = resolution.request_column(request, order.column)?;
            Some(OrderTerm {
                column,
                direction: direction(&order.dir),
            })
        })
        .collect()
}

/// Only the exact `desc` sorts descending.
fn direction(dir: &str) -> sql::ast::OrderByDirection {
    if dir == "desc" {
        sql::ast::OrderByDirection::Desc
    } else {
        sql::ast::OrderByDirection::Asc
    }
}

/// `ORDER BY a ASC, b DESC`, or `, a ASC, b DESC` to continue an existing sort.
pub fn order_text(terms: &[OrderTerm<'_>], pre_ordered: bool) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    let terms: Vec<String> = terms
        .iter()
        .map(|term| {
            format!(
                "{} {}",
                term.column.qualified_name(),
                term.direction.keyword()
            )
        })
        .collect();
    let prefix = if pre_ordered { ", " } else { "ORDER BY " };
    Some(format!("{prefix}{}", terms.join(", ")))
}
