pub mod bundle;
pub mod caster;
pub mod configuration;
pub mod environment;
pub mod error;
pub mod template;
pub mod values;

pub use bundle::{ComplexBundle, CountQuery, QueryBundle, SearchSettings, SimpleBundle};
pub use caster::StringCaster;
pub use configuration::{
    configuration_jsonschema, make_runtime_configuration, parse_configuration,
    write_parsed_configuration, Configuration, Grid, GridConfiguration, GridMode,
    ParsedConfiguration,
};
pub use error::{ConfigurationError, MakeRuntimeConfigurationError, ParseConfigurationError};
pub use template::{Slot, Template};
pub use values::{ConnectionUri, PoolSettings, Secret};
