//! Where configuration secrets are read from.

use std::collections::HashMap;

use crate::error::MakeRuntimeConfigurationError;

pub trait Environment {
    fn read(&self, variable: &str) -> Result<String, MakeRuntimeConfigurationError>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &str) -> Result<String, MakeRuntimeConfigurationError> {
        std::env::var(variable).map_err(|_| {
            MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                variable: variable.to_string(),
            }
        })
    }
}

/// A fixed set of variables, for tests.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<String, String>);

impl<const N: usize> From<[(String, String); N]> for FixedEnvironment {
    fn from(variables: [(String, String); N]) -> Self {
        FixedEnvironment(HashMap::from(variables))
    }
}

impl Environment for FixedEnvironment {
    fn read(&self, variable: &str) -> Result<String, MakeRuntimeConfigurationError> {
        self.0.get(variable).cloned().ok_or_else(|| {
            MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                variable: variable.to_string(),
            }
        })
    }
}
