//! The query bundle: everything a caller configures about how a grid is queried.
//!
//! `QueryBundle` is the serialized form, with every field a caller may set. It is validated
//! into a `SimpleBundle` (single-table mode) or a `ComplexBundle` (multi-source mode),
//! which hold only what their mode needs, with templates already parsed.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::caster::{StringCaster, DEFAULT_TO_STRING_CASTER, DEFAULT_TO_STRING_CASTER_SPECIFIER};
use crate::error::ConfigurationError;
use crate::template::{Slot, Template};

pub const DEFAULT_LIKE_OPERATOR: &str = "LIKE";

/// Query settings for one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryBundle {
    /// Primary key of the table, overriding the key of a model source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    /// Table queried in single-table mode when no source is given to the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// The statement run in multi-source mode, carrying the condition, order and limit
    /// placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_container: Option<String>,
    /// A statement returning one row with one count field, with a condition placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_count_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_count_query_cond_specifier: Option<String>,
    /// The case-insensitive "contains" operator of the database, such as `ILIKE`.
    #[serde(default = "default_like_operator")]
    pub non_case_sensitive_like_operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier_cond: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier_limit: Option<String>,
    /// When set, the limit placeholder receives the page length and this one the offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier_additional: Option<String>,
    /// The query container already has an `ORDER BY` that generated terms continue.
    #[serde(default)]
    pub pre_ordered: bool,
    #[serde(default = "default_to_string_caster")]
    pub to_string_caster: String,
    #[serde(default = "default_to_string_caster_specifier")]
    pub to_string_caster_specifier: String,
}

fn default_like_operator() -> String {
    DEFAULT_LIKE_OPERATOR.to_string()
}

fn default_to_string_caster() -> String {
    DEFAULT_TO_STRING_CASTER.to_string()
}

fn default_to_string_caster_specifier() -> String {
    DEFAULT_TO_STRING_CASTER_SPECIFIER.to_string()
}

impl Default for QueryBundle {
    fn default() -> Self {
        Self::empty()
    }
}

/// How search predicates are spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub like_operator: String,
    pub caster: StringCaster,
}

/// The record count statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    template: Template,
}

/// A bundle validated for single-table mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBundle {
    pub table_name: Option<String>,
    pub primary_key: Option<String>,
    pub count: CountQuery,
    pub search: SearchSettings,
}

/// A bundle validated for multi-source mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexBundle {
    pub query: Template,
    pub count: CountQuery,
    pub search: SearchSettings,
    pub pre_ordered: bool,
}

impl QueryBundle {
    pub fn empty() -> Self {
        QueryBundle {
            primary_key: None,
            table_name: None,
            query_container: None,
            base_count_query: None,
            base_count_query_cond_specifier: None,
            non_case_sensitive_like_operator: default_like_operator(),
            specifier_cond: None,
            specifier_order: None,
            specifier_limit: None,
            specifier_additional: None,
            pre_ordered: false,
            to_string_caster: default_to_string_caster(),
            to_string_caster_specifier: default_to_string_caster_specifier(),
        }
    }

    /// Validate the bundle for single-table mode.
    pub fn simple(&self) -> Result<SimpleBundle, ConfigurationError> {
        Ok(SimpleBundle {
            table_name: self.table_name.clone(),
            primary_key: self.primary_key.clone(),
            count: self.count_query()?,
            search: self.search_settings()?,
        })
    }

    /// Validate the bundle for multi-source mode.
    pub fn complex(&self) -> Result<ComplexBundle, ConfigurationError> {
        let container = required("query_container", self.query_container.as_deref())?;
        let condition = required("specifier_cond", self.specifier_cond.as_deref())?;
        let order = required("specifier_order", self.specifier_order.as_deref())?;

        let mut placeholders = vec![(Slot::Condition, condition), (Slot::Order, order)];
        match (
            self.specifier_limit.as_deref(),
            self.specifier_additional.as_deref(),
        ) {
            (None, None) => {}
            (Some(limit), None) => placeholders.push((Slot::Limit, limit)),
            (Some(limit), Some(offset)) => {
                placeholders.push((Slot::Limit, limit));
                placeholders.push((Slot::Offset, offset));
            }
            (None, Some(_)) => return Err(ConfigurationError::Missing("specifier_limit")),
        }

        Ok(ComplexBundle {
            query: Template::parse("query_container", container, &placeholders)?,
            count: self.count_query()?,
            search: self.search_settings()?,
            pre_ordered: self.pre_ordered,
        })
    }

    fn count_query(&self) -> Result<CountQuery, ConfigurationError> {
        let query = required("base_count_query", self.base_count_query.as_deref())?;
        let condition = required(
            "base_count_query_cond_specifier",
            self.base_count_query_cond_specifier.as_deref(),
        )?;
        Ok(CountQuery {
            template: Template::parse("base_count_query", query, &[(Slot::Condition, condition)])?,
        })
    }

    fn search_settings(&self) -> Result<SearchSettings, ConfigurationError> {
        let like_operator = required(
            "non_case_sensitive_like_operator",
            Some(self.non_case_sensitive_like_operator.trim()),
        )?;
        Ok(SearchSettings {
            like_operator: like_operator.to_string(),
            caster: StringCaster::parse(&self.to_string_caster, &self.to_string_caster_specifier)?,
        })
    }
}

impl CountQuery {
    /// Count every record.
    pub fn total_sql(&self) -> String {
        self.template.render(|_| "")
    }

    /// Count the records matching `filter`, the `WHERE ...` text of the search.
    pub fn filtered_sql(&self, filter: Option<&str>) -> String {
        let filter = filter.unwrap_or_default();
        self.template.render(|_| filter)
    }
}

impl ComplexBundle {
    /// The container has a separate slot for the page offset.
    pub fn has_offset_slot(&self) -> bool {
        self.query.has_slot(Slot::Offset)
    }
}

fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ConfigurationError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(ConfigurationError::Missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn counting() -> QueryBundle {
        QueryBundle {
            base_count_query: Some("SELECT count(*) AS count FROM users u {cond}".to_string()),
            base_count_query_cond_specifier: Some("{cond}".to_string()),
            ..QueryBundle::empty()
        }
    }

    #[test]
    fn deserializes_with_defaults() {
        let bundle: QueryBundle = serde_json::from_value(serde_json::json!({
            "table_name": "users",
            "base_count_query": "SELECT count(*) FROM users {cond}",
            "base_count_query_cond_specifier": "{cond}"
        }))
        .unwrap();

        assert_eq!(bundle.non_case_sensitive_like_operator, "LIKE");
        assert_eq!(bundle.to_string_caster, "CAST(? AS VARCHAR)");
        assert_eq!(bundle.to_string_caster_specifier, "?");
        assert!(!bundle.pre_ordered);
        assert!(bundle.simple().is_ok());
    }

    #[test]
    fn count_query_renders_total_and_filtered() {
        let bundle = counting().simple().unwrap();
        assert_eq!(
            bundle.count.total_sql(),
            "SELECT count(*) AS count FROM users u "
        );
        assert_eq!(
            bundle.count.filtered_sql(Some("WHERE (u.name LIKE '%bob%')")),
            "SELECT count(*) AS count FROM users u WHERE (u.name LIKE '%bob%')"
        );
        assert_eq!(bundle.count.filtered_sql(None), bundle.count.total_sql());
    }

    #[test]
    fn complex_mode_requires_a_container() {
        assert_eq!(
            counting().complex(),
            Err(ConfigurationError::Missing("query_container"))
        );
    }

    #[test]
    fn complex_mode_requires_the_limit_slot_for_an_offset_slot() {
        let bundle = QueryBundle {
            query_container: Some("SELECT * FROM users u {cond} {order} OFFSET {offset}".into()),
            specifier_cond: Some("{cond}".into()),
            specifier_order: Some("{order}".into()),
            specifier_additional: Some("{offset}".into()),
            ..counting()
        };
        assert_eq!(
            bundle.complex(),
            Err(ConfigurationError::Missing("specifier_limit"))
        );
    }

    #[test]
    fn complex_mode_detects_a_separate_offset_slot() {
        let bundle = QueryBundle {
            query_container: Some(
                "SELECT * FROM users u {cond} {order} LIMIT {limit} OFFSET {offset}".into(),
            ),
            specifier_cond: Some("{cond}".into()),
            specifier_order: Some("{order}".into()),
            specifier_limit: Some("{limit}".into()),
            specifier_additional: Some("{offset}".into()),
            ..counting()
        };
        assert!(bundle.complex().unwrap().has_offset_slot());
    }

    #[test]
    fn blank_like_operator_is_missing() {
        let bundle = QueryBundle {
            non_case_sensitive_like_operator: "  ".to_string(),
            ..counting()
        };
        assert_eq!(
            bundle.simple(),
            Err(ConfigurationError::Missing("non_case_sensitive_like_operator"))
        );
    }
}
