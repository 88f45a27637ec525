//! Metrics setup and update for grid queries.

use std::time::Duration;

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    query_total: IntCounter,
    error_total: IntCounter,
    statement_execution_time: Histogram,
}

impl Metrics {
    /// Set up the counters and histogram and register them with the provided registry.
    pub fn initialize(metrics_registry: &mut Registry) -> Result<Self, prometheus::Error> {
        let query_total = add_int_counter_metric(
            metrics_registry,
            "datagrid_query_total",
            "Total successful grid queries.",
        )?;

        let error_total = add_int_counter_metric(
            metrics_registry,
            "datagrid_error_total",
            "Total grid queries that failed.",
        )?;

        let statement_execution_time = add_histogram_metric(
            metrics_registry,
            "datagrid_statement_execution_time",
            "Time taken to run one statement, in seconds.",
        )?;

        Ok(Self {
            query_total,
            error_total,
            statement_execution_time,
        })
    }

    pub fn record_successful_query(&self) {
        self.query_total.inc();
    }

    pub fn record_failed_query(&self) {
        self.error_total.inc();
    }

    pub fn record_statement_execution_time(&self, duration: Duration) {
        self.statement_execution_time.observe(duration.as_secs_f64());
    }
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<IntCounter, prometheus::Error> {
    let int_counter = IntCounter::with_opts(Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new histogram metric and register it with the provided Prometheus Registry
fn add_histogram_metric(
    metrics_registry: &mut Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, prometheus::Error> {
    let histogram = Histogram::with_opts(HistogramOpts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}
