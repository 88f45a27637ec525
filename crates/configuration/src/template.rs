//! Caller-owned SQL templates with placeholders for generated fragments.
//!
//! A template is split into text and slots once, when the bundle is validated. Rendering
//! then concatenates the pieces in a single pass, so a generated fragment is never searched
//! for placeholders again.

use crate::error::ConfigurationError;

/// The insertion points a template may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The search predicate, `WHERE ...`.
    Condition,
    /// The sort clause, `ORDER BY ...`.
    Order,
    /// The page clause, or the page length when the offset has its own slot.
    Limit,
    /// The page offset.
    Offset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Split `text` on its placeholders.
    ///
    /// Every placeholder must be non-empty and appear exactly once, and no two placeholders
    /// may overlap in the text or contain one another.
    pub fn parse(
        field: &'static str,
        text: &str,
        placeholders: &[(Slot, &str)],
    ) -> Result<Template, ConfigurationError> {
        if placeholders.iter().any(|(_, placeholder)| placeholder.is_empty()) {
            return Err(ConfigurationError::EmptyPlaceholder(field));
        }
        for (index, (_, placeholder)) in placeholders.iter().enumerate() {
            for (_, other) in &placeholders[index + 1..] {
                if placeholder.contains(other) || other.contains(placeholder) {
                    return Err(ConfigurationError::OverlappingPlaceholders {
                        field,
                        first: (*placeholder).to_string(),
                        second: (*other).to_string(),
                    });
                }
            }
        }

        let mut positions = Vec::with_capacity(placeholders.len());
        for (slot, placeholder) in placeholders {
            let found: Vec<usize> = text.match_indices(placeholder).map(|(at, _)| at).collect();
            match found.as_slice() {
                [] => {
                    return Err(ConfigurationError::PlaceholderNotFound {
                        field,
                        placeholder: (*placeholder).to_string(),
                    })
                }
                [at] => positions.push((*at, placeholder.len(), *slot, *placeholder)),
                _ => {
                    return Err(ConfigurationError::DuplicatePlaceholder {
                        field,
                        placeholder: (*placeholder).to_string(),
                        count: found.len(),
                    })
                }
            }
        }
        positions.sort_by_key(|(at, ..)| *at);

        let mut segments = vec![];
        let mut cursor = 0;
        let mut previous: Option<&str> = None;
        for (at, length, slot, placeholder) in positions {
            if at < cursor {
                return Err(ConfigurationError::OverlappingPlaceholders {
                    field,
                    first: previous.unwrap_or_default().to_string(),
                    second: placeholder.to_string(),
                });
            }
            if at > cursor {
                segments.push(Segment::Text(text[cursor..at].to_string()));
            }
            segments.push(Segment::Slot(slot));
            cursor = at + length;
            previous = Some(placeholder);
        }
        if cursor < text.len() {
            segments.push(Segment::Text(text[cursor..].to_string()));
        }

        Ok(Template { segments })
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.segments.contains(&Segment::Slot(slot))
    }

    /// Produce the statement text, filling each slot with `fill(slot)`.
    pub fn render<'a>(&self, fill: impl Fn(Slot) -> &'a str) -> String {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Slot(slot) => rendered.push_str(fill(*slot)),
            }
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const QUERY: &str = "SELECT * FROM users u {cond} {order} {limit}";

    fn placeholders() -> [(Slot, &'static str); 3] {
        [
            (Slot::Condition, "{cond}"),
            (Slot::Order, "{order}"),
            (Slot::Limit, "{limit}"),
        ]
    }

    #[test]
    fn renders_each_slot_once() {
        let template = Template::parse("query_container", QUERY, &placeholders()).unwrap();
        let rendered = template.render(|slot| match slot {
            Slot::Condition => "WHERE name LIKE '%{order}%'",
            Slot::Order => "ORDER BY name ASC",
            Slot::Limit | Slot::Offset => "",
        });

        assert_eq!(
            rendered,
            "SELECT * FROM users u WHERE name LIKE '%{order}%' ORDER BY name ASC "
        );
        assert!(template.has_slot(Slot::Limit));
        assert!(!template.has_slot(Slot::Offset));
    }

    #[test]
    fn rejects_missing_placeholders() {
        let result = Template::parse("query_container", "SELECT 1 {cond}", &placeholders());
        assert_eq!(
            result,
            Err(ConfigurationError::PlaceholderNotFound {
                field: "query_container",
                placeholder: "{order}".to_string()
            })
        );
    }

    #[test]
    fn rejects_repeated_placeholders() {
        let result = Template::parse(
            "base_count_query",
            "SELECT count(*) FROM t ? AND ?",
            &[(Slot::Condition, "?")],
        );
        assert_eq!(
            result,
            Err(ConfigurationError::DuplicatePlaceholder {
                field: "base_count_query",
                placeholder: "?".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn rejects_nested_placeholders() {
        let result = Template::parse(
            "query_container",
            "SELECT 1 LIMIT_OFFSET",
            &[(Slot::Limit, "LIMIT"), (Slot::Offset, "LIMIT_OFFSET")],
        );
        assert!(matches!(
            result,
            Err(ConfigurationError::OverlappingPlaceholders { .. })
        ));
    }

    #[test]
    fn rejects_empty_placeholders() {
        let result = Template::parse("base_count_query", "SELECT 1", &[(Slot::Condition, "")]);
        assert_eq!(
            result,
            Err(ConfigurationError::EmptyPlaceholder("base_count_query"))
        );
    }
}
