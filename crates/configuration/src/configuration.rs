//! Configuration for the engine, as read from a configuration directory.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use query_engine_metadata::metadata::ColumnSpec;

use crate::bundle::{ComplexBundle, QueryBundle, SimpleBundle};
use crate::environment::Environment;
use crate::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use crate::values::{ConnectionUri, PoolSettings, Secret};

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "DATABASE_URL";

/// The configuration file as written by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    #[serde(default = "default_connection_uri")]
    pub connection_uri: ConnectionUri,
    #[serde(default, skip_serializing_if = "PoolSettings::is_default")]
    pub pool_settings: PoolSettings,
    /// The grids that can be served, by name.
    #[serde(default)]
    pub grids: BTreeMap<String, GridConfiguration>,
}

/// How one grid is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GridConfiguration {
    pub bundle: QueryBundle,
    pub columns: Vec<ColumnSpec>,
    /// Request columns before this index are client-side decoration and are never
    /// searched, sorted or projected.
    #[serde(default)]
    pub start_column: usize,
    /// Prefix every output row with its 1-based position.
    #[serde(default)]
    pub use_numbering: bool,
}

/// The configuration used at runtime: secrets resolved and every bundle validated.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub connection_uri: String,
    pub pool_settings: PoolSettings,
    pub grids: BTreeMap<String, Grid>,
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub mode: GridMode,
    pub columns: Vec<ColumnSpec>,
    pub start_column: usize,
    pub use_numbering: bool,
}

/// A grid with a query container runs in multi-source mode; any other grid queries a
/// single table.
#[derive(Debug, Clone)]
pub enum GridMode {
    Simple(SimpleBundle),
    Complex(ComplexBundle),
}

fn default_connection_uri() -> ConnectionUri {
    ConnectionUri(Secret::FromEnvironment {
        variable: DEFAULT_CONNECTION_URI_VARIABLE.to_string(),
    })
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        ParsedConfiguration {
            version: CURRENT_VERSION,
            connection_uri: default_connection_uri(),
            pool_settings: PoolSettings::default(),
            grids: BTreeMap::new(),
        }
    }
}

/// Read `configuration.json` from a configuration directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);
    let contents = tokio::fs::read_to_string(&configuration_file).await?;

    let parsed: ParsedConfiguration =
        serde_json::from_str(&contents).map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion(
            parsed.version,
            CURRENT_VERSION,
        ));
    }
    Ok(parsed)
}

/// Write a configuration to `configuration.json` in a configuration directory.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), ParseConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    let contents = serde_json::to_string_pretty(parsed_config).map_err(|error| {
        ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    })?;
    tokio::fs::write(&configuration_file, contents + "\n").await?;
    Ok(())
}

/// Resolve secrets and validate every grid.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri {
        ConnectionUri(Secret::Plain(uri)) => uri,
        ConnectionUri(Secret::FromEnvironment { variable }) => environment.read(&variable)?,
    };

    let grids = parsed_config
        .grids
        .into_iter()
        .map(|(name, grid)| {
            let mode = grid.mode().map_err(|source| {
                MakeRuntimeConfigurationError::InvalidGrid {
                    grid: name.clone(),
                    source,
                }
            })?;
            Ok((
                name,
                Grid {
                    mode,
                    columns: grid.columns,
                    start_column: grid.start_column,
                    use_numbering: grid.use_numbering,
                },
            ))
        })
        .collect::<Result<BTreeMap<_, _>, MakeRuntimeConfigurationError>>()?;

    Ok(Configuration {
        connection_uri,
        pool_settings: parsed_config.pool_settings,
        grids,
    })
}

impl GridConfiguration {
    /// Validate the bundle for the mode it describes.
    pub fn mode(&self) -> Result<GridMode, crate::error::ConfigurationError> {
        if self.bundle.query_container.is_some() {
            Ok(GridMode::Complex(self.bundle.complex()?))
        } else {
            Ok(GridMode::Simple(self.bundle.simple()?))
        }
    }
}

/// The JSON schema of the configuration file.
pub fn configuration_jsonschema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}
