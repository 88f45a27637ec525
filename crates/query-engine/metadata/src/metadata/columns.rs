//! Backend column specifications.

use datagrid_models::ColumnKey;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A backend column, and the client column it answers to.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    /// The column name in the backend.
    pub col: String,
    /// The client column identifier, matched against the request's `columns[].data`.
    #[schemars(with = "ColumnKeySchema")]
    pub dt: ColumnKey,
    /// Relation alias used to qualify the column in generated predicates and sort terms,
    /// for queries that join several relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(JsonSchema)]
#[serde(untagged)]
#[allow(dead_code)]
enum ColumnKeySchema {
    Integer(i64),
    String(String),
}

impl ColumnSpec {
    pub fn new(col: impl Into<String>, dt: impl Into<ColumnKey>) -> Self {
        ColumnSpec {
            col: col.into(),
            dt: dt.into(),
            alias: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The alias, unless it is absent or blank.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref().filter(|alias| !alias.is_empty())
    }

    /// `alias.col` when the column has an alias, otherwise `col`.
    pub fn qualified_name(&self) -> String {
        match self.alias() {
            Some(alias) => format!("{alias}.{}", self.col),
            None => self.col.clone(),
        }
    }
}
