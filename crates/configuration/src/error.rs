//! Errors that can be thrown when processing configuration.

/// The bundle supplied for a query mode is incomplete or its templates are unusable.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("missing required configuration field '{0}'")]
    Missing(&'static str),

    #[error("placeholder for '{0}' must not be empty")]
    EmptyPlaceholder(&'static str),

    #[error("placeholder {placeholder:?} was not found in '{field}'")]
    PlaceholderNotFound {
        field: &'static str,
        placeholder: String,
    },

    #[error("placeholder {placeholder:?} appears {count} times in '{field}', but must appear exactly once")]
    DuplicatePlaceholder {
        field: &'static str,
        placeholder: String,
        count: usize,
    },

    #[error("placeholders {first:?} and {second:?} overlap in '{field}'")]
    OverlappingPlaceholders {
        field: &'static str,
        first: String,
        second: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: std::path::PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unsupported configuration version {0}, expected {1}")]
    UnsupportedVersion(u32, u32),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("environment variable {variable:?} is not set")]
    MissingEnvironmentVariable { variable: String },

    #[error("grid {grid:?} is misconfigured: {source}")]
    InvalidGrid {
        grid: String,
        source: ConfigurationError,
    },
}
