use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use datagrid::state;
use datagrid_configuration::environment::ProcessEnvironment;
use datagrid_configuration::{make_runtime_configuration, parse_configuration};
use datagrid_models::{GridRequest, OutputFormat};

/// Answer one grid request and print the response envelope.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The directory holding `configuration.json`.
    #[arg(long, env = "DATAGRID_CONFIGURATION_DIRECTORY", default_value = ".")]
    configuration: PathBuf,
    /// The name of the grid to query.
    #[arg(long)]
    grid: String,
    /// A file holding the request as JSON. The request is read from stdin when absent.
    request: Option<PathBuf>,
    /// Pretty-print the envelope.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let parsed = parse_configuration(&args.configuration)
        .instrument(info_span!("Parse configuration"))
        .await
        .with_context(|| format!("reading {}", args.configuration.display()))?;
    let configuration = make_runtime_configuration(parsed, ProcessEnvironment)?;
    let grid = configuration
        .grids
        .get(&args.grid)
        .with_context(|| format!("no grid named {:?} is configured", args.grid))?;

    let request: GridRequest = match &args.request {
        Some(path) => serde_json::from_str(
            &tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?,
        )?,
        None => serde_json::from_reader(std::io::stdin().lock())?,
    };

    let mut metrics_registry = prometheus::Registry::new();
    let state = state::create_state(&configuration, &mut metrics_registry).await?;

    let response = datagrid::grid_result(
        &state.executor,
        grid,
        &request,
        OutputFormat::Value,
        Some(&state.metrics),
    )
    .await?;

    let json = if args.pretty {
        match response {
            datagrid_models::GridResponse::Envelope(envelope) => {
                serde_json::to_string_pretty(&envelope)?
            }
            datagrid_models::GridResponse::Serialized(json) => json,
        }
    } else {
        response.into_json()?
    };
    println!("{json}");
    Ok(())
}
