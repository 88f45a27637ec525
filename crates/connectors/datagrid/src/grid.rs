//! Answer one grid request: translate it, run the statements, shape the envelope.

use tracing::{info_span, Instrument};

use datagrid_configuration::{ComplexBundle, Grid, GridMode, SimpleBundle};
use datagrid_models::{GridRequest, GridResponse, OutputFormat, ResponseEnvelope};
use query_engine_execution::executor::Executor;
use query_engine_execution::{execution, formatting, metrics};
use query_engine_metadata::metadata::ColumnSpec;
use query_engine_translation::translation::backend::StructuredSource;
use query_engine_translation::translation::query::{self, TranslatedQuery};

use crate::error::Error;

/// How a grid is presented, independent of where its data comes from.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Request columns before this index are never searched, sorted or shown.
    pub start_column: usize,
    /// Prefix every row with its 1-based position in the whole result.
    pub use_numbering: bool,
    pub output: OutputFormat,
    pub metrics: Option<metrics::Metrics>,
}

/// Answer a request against a single table.
///
/// The table is `source` when given, otherwise the bundle's `table_name`.
pub async fn simple_result<E: Executor + ?Sized>(
    executor: &E,
    request: &GridRequest,
    bundle: &SimpleBundle,
    columns: &[ColumnSpec],
    options: &Options,
    source: Option<&StructuredSource>,
) -> Result<GridResponse, Error> {
    let result = async {
        let translated = info_span!("Translate request").in_scope(|| {
            query::translate_simple(request, bundle, columns, options.start_column, source)
        })?;
        respond(executor, request, translated, options).await
    }
    .instrument(info_span!("Simple grid request", draw = request.draw))
    .await;

    record(options.metrics.as_ref(), result)
}

/// Answer a request by filling the bundle's query container.
pub async fn complex_result<E: Executor + ?Sized>(
    executor: &E,
    request: &GridRequest,
    bundle: &ComplexBundle,
    columns: &[ColumnSpec],
    options: &Options,
) -> Result<GridResponse, Error> {
    let result = async {
        let translated = info_span!("Translate request").in_scope(|| {
            query::translate_complex(request, bundle, columns, options.start_column)
        });
        respond(executor, request, translated, options).await
    }
    .instrument(info_span!("Complex grid request", draw = request.draw))
    .await;

    record(options.metrics.as_ref(), result)
}

/// Answer a request against a configured grid, in whichever mode it was set up for.
pub async fn grid_result<E: Executor + ?Sized>(
    executor: &E,
    grid: &Grid,
    request: &GridRequest,
    output: OutputFormat,
    metrics: Option<&metrics::Metrics>,
) -> Result<GridResponse, Error> {
    let options = Options {
        start_column: grid.start_column,
        use_numbering: grid.use_numbering,
        output,
        metrics: metrics.cloned(),
    };
    match &grid.mode {
        GridMode::Simple(bundle) => {
            simple_result(executor, request, bundle, &grid.columns, &options, None).await
        }
        GridMode::Complex(bundle) => {
            complex_result(executor, request, bundle, &grid.columns, &options).await
        }
    }
}

async fn respond<E: Executor + ?Sized>(
    executor: &E,
    request: &GridRequest,
    translated: TranslatedQuery,
    options: &Options,
) -> Result<GridResponse, Error> {
    let result = execution::execute(executor, options.metrics.as_ref(), &translated.plan).await?;

    let numbering = options
        .use_numbering
        .then(|| formatting::first_row_number(request.start));
    let data = formatting::format_rows(&result.rows, &translated.projection, numbering);

    let envelope = ResponseEnvelope {
        draw: request.draw,
        records_total: result.records_total,
        records_filtered: result.records_filtered,
        data,
    };
    Ok(envelope.into_response(options.output)?)
}

fn record(
    metrics: Option<&metrics::Metrics>,
    result: Result<GridResponse, Error>,
) -> Result<GridResponse, Error> {
    match &result {
        Ok(_) => {
            if let Some(metrics) = metrics {
                metrics.record_successful_query();
            }
        }
        Err(err) => {
            log_err(err);
            if let Some(metrics) = metrics {
                metrics.record_failed_query();
            }
        }
    }
    result
}

fn log_err(err: &Error) {
    tracing::error!(
        meta.signal_type = "log",
        event.domain = "datagrid",
        event.name = "Grid request error",
        name = "Grid request error",
        body = %err,
        error = true,
    );
}
