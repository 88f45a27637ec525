//! Translate a grid request into an execution plan.
//!
//! Both modes run the same builders in the same order, filter, then order, then limit,
//! over their own backend. The resulting plan holds the main query and both count
//! statements.

use datagrid_configuration::{
    ComplexBundle, ConfigurationError, CountQuery, SearchSettings, SimpleBundle,
};
use datagrid_models::GridRequest;
use query_engine_metadata::metadata::ColumnSpec;
use query_engine_sql::sql;

use super::backend::{
    Backend, InFlightQuery, StructuredBackend, StructuredSource, TemplateBackend, TemplateQuery,
};
use super::resolution::{self, ColumnResolution};
use super::{filtering, limiting, sorting};

/// A translated request: what to run, and which row fields to show.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    pub plan: sql::execution_plan::ExecutionPlan,
    /// Backend column names to project from each row, in request order.
    pub projection: Vec<String>,
}

/// Translate a request against a single table.
///
/// The table is `source` when given, otherwise the bundle's `table_name`.
pub fn translate_simple(
    request: &GridRequest,
    bundle: &SimpleBundle,
    columns: &[ColumnSpec],
    start_column: usize,
    source: Option<&StructuredSource>,
) -> Result<TranslatedQuery, ConfigurationError> {
    let source = match (source, &bundle.table_name) {
        (Some(source), _) => source.clone(),
        (None, Some(table)) if !table.is_empty() => StructuredSource::Table(table.clone()),
        (None, _) => return Err(ConfigurationError::Missing("table_name")),
    };

    let resolution = resolution::resolve(request, columns, start_column);
    let backend = StructuredBackend::new(&bundle.search);
    let mut in_flight = InFlightQuery::new(StructuredBackend::source_query(
        &source,
        bundle.primary_key.as_deref(),
    ));
    build(
        &backend,
        &mut in_flight,
        request,
        &resolution,
        &bundle.search,
    );

    let plan = make_plan(
        sql::execution_plan::Query::Structured(in_flight.query),
        &bundle.count,
        in_flight.filter.as_deref(),
    );
    Ok(TranslatedQuery {
        plan,
        projection: resolution.projection(),
    })
}

/// Translate a request into the bundle's query container.
pub fn translate_complex(
    request: &GridRequest,
    bundle: &ComplexBundle,
    columns: &[ColumnSpec],
    start_column: usize,
) -> TranslatedQuery {
    let resolution = resolution::resolve(request, columns, start_column);
    let backend = TemplateBackend::new(bundle);
    let mut in_flight = InFlightQuery::new(TemplateQuery::new(&bundle.query));
    build(
        &backend,
        &mut in_flight,
        request,
        &resolution,
        &bundle.search,
    );

    let plan = make_plan(
        sql::execution_plan::Query::Raw(in_flight.query.render()),
        &bundle.count,
        in_flight.filter.as_deref(),
    );
    TranslatedQuery {
        plan,
        projection: resolution.projection(),
    }
}

fn build<B: Backend>(
    backend: &B,
    in_flight: &mut InFlightQuery<B::Query>,
    request: &GridRequest,
    resolution: &ColumnResolution<'_>,
    search: &SearchSettings,
) {
    filtering::translate_filter(backend, in_flight, request, resolution, search);
    sorting::translate_order(backend, in_flight, request, resolution);
    limiting::translate_limit(backend, in_flight, request);

    tracing::debug!(
        filter = ?in_flight.filter,
        order = ?in_flight.order,
        limit = ?in_flight.limit,
        "translated grid request"
    );
}

fn make_plan(
    query: sql::execution_plan::Query,
    count: &CountQuery,
    filter: Option<&str>,
) -> sql::execution_plan::ExecutionPlan {
    sql::execution_plan::ExecutionPlan {
        query,
        total_count: count.total_sql(),
        filtered_count: count.filtered_sql(filter),
    }
}
