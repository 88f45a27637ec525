//! Match client columns to backend columns.
//!
//! A client column answers to the first column spec whose `dt` equals its `data`. Client
//! columns with no match, and every column before `start_column`, take no part in
//! searching, sorting or projection.

use indexmap::IndexMap;

use datagrid_models::{ColumnKey, GridRequest};
use query_engine_metadata::metadata::ColumnSpec;

/// A request column paired with the backend column it answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Index into the request's `columns`.
    pub request_index: usize,
    /// Index into the column specs.
    pub column_index: usize,
}

/// The columns of one request, resolved against the column specs.
#[derive(Debug, Clone)]
pub struct ColumnResolution<'a> {
    columns: &'a [ColumnSpec],
    by_key: IndexMap<&'a ColumnKey, usize>,
    start_column: usize,
    resolved: Vec<ResolvedColumn>,
}

/// Resolve every request column at or after `start_column`.
pub fn resolve<'a>(
    request: &GridRequest,
    columns: &'a [ColumnSpec],
    start_column: usize,
) -> ColumnResolution<'a> {
    let mut by_key = IndexMap::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        by_key.entry(&column.dt).or_insert(index);
    }

    let resolved = request
        .columns
        .iter()
        .enumerate()
        .skip(start_column)
        .filter_map(|(request_index, request_column)| {
            let key = request_column.data.as_ref()?;
            by_key.get(key).map(|column_index| ResolvedColumn {
                request_index,
                column_index: *column_index,
            })
        })
        .collect();

    ColumnResolution {
        columns,
        by_key,
        start_column,
        resolved,
    }
}

impl<'a> ColumnResolution<'a> {
    /// The resolved request columns, in request order.
    pub fn resolved(&self) -> &[ResolvedColumn] {
        &self.resolved
    }

    /// The column spec answering to a client column identifier.
    pub fn lookup(&self, key: &ColumnKey) -> Option<&'a ColumnSpec> {
        let columns = self.columns;
        self.by_key.get(key).map(|index| &columns[*index])
    }

    /// The column spec of a request column, unless it is before the start column or
    /// unresolved.
    pub fn request_column(
        &self,
        request: &GridRequest,
        request_index: usize,
    ) -> Option<&'a ColumnSpec> {
        if request_index < self.start_column {
            return None;
        }
        let key = request.columns.get(request_index)?.data.as_ref()?;
        self.lookup(key)
    }

    pub fn column(&self, resolved: ResolvedColumn) -> &'a ColumnSpec {
        &self.columns[resolved.column_index]
    }

    /// Backend column names to project, in request order.
    pub fn projection(&self) -> Vec<String> {
        self.resolved
            .iter()
            .map(|resolved| self.column(*resolved).col.clone())
            .collect()
    }
}
