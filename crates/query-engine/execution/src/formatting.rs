//! Reshape result rows into the array-of-arrays the grid client expects.

use crate::executor::Row;

/// The number of the first row of a page starting at `start`.
pub fn first_row_number(start: Option<u64>) -> u64 {
    start.unwrap_or(0) + 1
}

/// Project each row onto `projection`, in order. A field missing from a row is `null`.
/// When `numbering` holds the first row number, each row is prefixed with its number.
pub fn format_rows(
    rows: &[Row],
    projection: &[String],
    numbering: Option<u64>,
) -> Vec<Vec<serde_json::Value>> {
    rows.iter()
        .zip(0..)
        .map(|(row, position)| {
            let mut values = Vec::with_capacity(projection.len() + 1);
            if let Some(first) = numbering {
                values.push(serde_json::Value::from(first + position));
            }
            values.extend(
                projection
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or_default()),
            );
            values
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(row) => row,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn numbering_continues_from_the_start() {
        let rows = vec![
            row(json!({ "name": "ada", "age": 36 })),
            row(json!({ "name": "bob", "age": 41 })),
        ];
        let projection = vec!["name".to_string()];

        assert_eq!(
            format_rows(&rows, &projection, Some(first_row_number(Some(9)))),
            vec![vec![json!(10), json!("ada")], vec![json!(11), json!("bob")]]
        );
    }

    #[test]
    fn projects_in_request_order_and_fills_missing_fields() {
        let rows = vec![row(json!({ "name": "ada", "age": 36 }))];
        let projection = vec!["age".to_string(), "email".to_string(), "name".to_string()];

        assert_eq!(
            format_rows(&rows, &projection, None),
            vec![vec![json!(36), json!(null), json!("ada")]]
        );
    }

    #[test]
    fn pages_without_a_start_number_from_one() {
        assert_eq!(first_row_number(None), 1);
        assert_eq!(first_row_number(Some(0)), 1);
    }
}
