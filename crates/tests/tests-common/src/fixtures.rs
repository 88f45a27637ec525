//! Requests and rows for tests.

use datagrid_models::GridRequest;
use query_engine_execution::executor::Row;

/// Build a grid request from JSON, the way a client would send it.
pub fn request(value: serde_json::Value) -> GridRequest {
    serde_json::from_value(value).expect("the request should deserialize")
}

/// A client column entry that can be searched and sorted.
pub fn column(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "data": data,
        "searchable": "true",
        "orderable": "true",
        "search": { "value": "" }
    })
}

/// A client column entry used only for decoration, such as a row number.
pub fn decoration_column() -> serde_json::Value {
    serde_json::json!({
        "data": null,
        "searchable": "false",
        "orderable": "false",
        "search": { "value": "" }
    })
}

pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(row) => row,
        other => panic!("a row must be a JSON object, got {other}"),
    }
}

/// A few rows of the `users` table.
pub fn users() -> Vec<Row> {
    vec![
        row(serde_json::json!({ "id": 1, "name": "ada", "email": "ada@example.com", "age": 36 })),
        row(serde_json::json!({ "id": 2, "name": "bob", "email": "bob@example.com", "age": 41 })),
    ]
}
