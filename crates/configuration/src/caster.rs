//! The expression that casts a column to a string before it is searched.

use query_engine_sql::sql;

use crate::error::ConfigurationError;

pub const DEFAULT_TO_STRING_CASTER: &str = "CAST(? AS VARCHAR)";
pub const DEFAULT_TO_STRING_CASTER_SPECIFIER: &str = "?";

/// A cast expression such as `CAST(? AS VARCHAR)`, split around its column specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCaster {
    before: String,
    after: String,
}

impl StringCaster {
    /// The specifier must appear exactly once in the caster.
    pub fn parse(caster: &str, specifier: &str) -> Result<StringCaster, ConfigurationError> {
        if specifier.is_empty() {
            return Err(ConfigurationError::EmptyPlaceholder(
                "to_string_caster_specifier",
            ));
        }
        match caster.matches(specifier).count() {
            0 => Err(ConfigurationError::PlaceholderNotFound {
                field: "to_string_caster",
                placeholder: specifier.to_string(),
            }),
            1 => {
                let (before, after) = caster
                    .split_once(specifier)
                    .ok_or(ConfigurationError::Missing("to_string_caster_specifier"))?;
                Ok(StringCaster {
                    before: before.to_string(),
                    after: after.to_string(),
                })
            }
            count => Err(ConfigurationError::DuplicatePlaceholder {
                field: "to_string_caster",
                placeholder: specifier.to_string(),
                count,
            }),
        }
    }

    /// Cast a column given as SQL text.
    pub fn apply(&self, column: &str) -> String {
        format!("{}{column}{}", self.before, self.after)
    }

    /// The same cast, for the SQL AST.
    pub fn cast_template(&self) -> sql::ast::CastTemplate {
        sql::ast::CastTemplate {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl Default for StringCaster {
    fn default() -> Self {
        StringCaster {
            before: "CAST(".to_string(),
            after: " AS VARCHAR)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn default_caster_matches_default_settings() {
        let parsed =
            StringCaster::parse(DEFAULT_TO_STRING_CASTER, DEFAULT_TO_STRING_CASTER_SPECIFIER)
                .unwrap();
        assert_eq!(parsed, StringCaster::default());
        assert_eq!(parsed.apply("u.name"), "CAST(u.name AS VARCHAR)");
    }

    #[test]
    fn bare_specifier_leaves_the_column_alone() {
        let caster = StringCaster::parse("?", "?").unwrap();
        assert_eq!(caster.apply("email"), "email");
    }

    #[test]
    fn specifier_must_appear_once() {
        assert_eq!(
            StringCaster::parse("COALESCE(?::text, ?)", "?"),
            Err(ConfigurationError::DuplicatePlaceholder {
                field: "to_string_caster",
                placeholder: "?".to_string(),
                count: 2
            })
        );
        assert!(StringCaster::parse("name::text", "?").is_err());
    }
}
