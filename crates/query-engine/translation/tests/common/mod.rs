//! Fixtures shared by the translation tests.

use datagrid_configuration::{ComplexBundle, QueryBundle, SimpleBundle};
use datagrid_models::GridRequest;
use query_engine_metadata::metadata::ColumnSpec;

pub const CONTAINER: &str = "SELECT * FROM users {cond} {order} {limit}";
pub const COUNT: &str = "SELECT count(*) AS count FROM users {cond}";

/// A request over the given client columns, every one searchable and orderable.
pub fn request(columns: &[serde_json::Value], extra: serde_json::Value) -> GridRequest {
    let mut request = serde_json::json!({
        "draw": 1,
        "columns": columns
            .iter()
            .map(|data| serde_json::json!({
                "data": data,
                "searchable": "true",
                "orderable": "true",
                "search": { "value": "" }
            }))
            .collect::<Vec<_>>(),
    });
    if let (Some(request), serde_json::Value::Object(extra)) = (request.as_object_mut(), extra) {
        request.extend(extra);
    }
    serde_json::from_value(request).unwrap()
}

pub fn name_and_email() -> Vec<ColumnSpec> {
    vec![ColumnSpec::new("name", 0), ColumnSpec::new("email", 1)]
}

/// Counting, `LIKE` and a bare caster, so generated predicates stay readable.
pub fn bundle() -> QueryBundle {
    QueryBundle {
        base_count_query: Some(COUNT.to_string()),
        base_count_query_cond_specifier: Some("{cond}".to_string()),
        to_string_caster: "?".to_string(),
        ..QueryBundle::empty()
    }
}

pub fn complex(container: &str) -> ComplexBundle {
    QueryBundle {
        query_container: Some(container.to_string()),
        specifier_cond: Some("{cond}".to_string()),
        specifier_order: Some("{order}".to_string()),
        specifier_limit: Some("{limit}".to_string()),
        ..bundle()
    }
    .complex()
    .unwrap()
}

pub fn simple(table: &str) -> SimpleBundle {
    QueryBundle {
        table_name: Some(table.to_string()),
        ..bundle()
    }
    .simple()
    .unwrap()
}
