//! The response envelope returned to the grid client.

use serde::{Deserialize, Serialize};

/// One page of grid data along with the record counts the client needs for paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Echoed from the request.
    pub draw: i64,
    /// Number of records before filtering.
    pub records_total: u64,
    /// Number of records after filtering, before paging.
    pub records_filtered: u64,
    /// One entry per row, one value per visible column.
    pub data: Vec<Vec<serde_json::Value>>,
}

/// How the envelope is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Serialized JSON text, ready to be written to the client.
    #[default]
    Json,
    /// The envelope itself.
    Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridResponse {
    Envelope(ResponseEnvelope),
    Serialized(String),
}

impl ResponseEnvelope {
    pub fn into_response(self, format: OutputFormat) -> Result<GridResponse, serde_json::Error> {
        match format {
            OutputFormat::Value => Ok(GridResponse::Envelope(self)),
            OutputFormat::Json => Ok(GridResponse::Serialized(serde_json::to_string(&self)?)),
        }
    }
}

impl GridResponse {
    /// The response as JSON text, serializing if needed.
    pub fn into_json(self) -> Result<String, serde_json::Error> {
        match self {
            GridResponse::Envelope(envelope) => serde_json::to_string(&envelope),
            GridResponse::Serialized(json) => Ok(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn serializes_with_client_field_names() {
        let envelope = ResponseEnvelope {
            draw: 2,
            records_total: 57,
            records_filtered: 3,
            data: vec![vec![json!(1), json!("bob")]],
        };

        let GridResponse::Serialized(text) = envelope.into_response(OutputFormat::Json).unwrap()
        else {
            panic!("expected serialized output");
        };

        assert_eq!(
            text,
            r#"{"draw":2,"recordsTotal":57,"recordsFiltered":3,"data":[[1,"bob"]]}"#
        );
    }
}
