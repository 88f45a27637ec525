//! The grid data request.
//!
//! Clients encode the same request either as JSON or as form parameters, so numbers,
//! flags and column identifiers arrive sometimes as JSON scalars and sometimes as strings.
//! Everything here accepts both and normalizes.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A request for one page of grid data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridRequest {
    /// Sequence number of the request, echoed back untouched.
    #[serde(default, deserialize_with = "integer")]
    pub draw: i64,
    /// Offset of the first row of the page.
    #[serde(default, deserialize_with = "optional_offset")]
    pub start: Option<u64>,
    #[serde(default)]
    pub length: Length,
    /// The global search term.
    #[serde(default)]
    pub search: Search,
    #[serde(default)]
    pub columns: Vec<RequestColumn>,
    #[serde(default)]
    pub order: Vec<Order>,
}

/// Number of rows requested. `-1` on the wire means every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Length {
    #[default]
    All,
    Rows(u64),
}

/// A search term; empty means no search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub value: String,
}

/// One client-side column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestColumn {
    /// The client column identifier. Decoration columns often send `null`.
    #[serde(default)]
    pub data: Option<ColumnKey>,
    #[serde(default, deserialize_with = "flag")]
    pub searchable: String,
    #[serde(default, deserialize_with = "flag")]
    pub orderable: String,
    #[serde(default)]
    pub search: Search,
}

/// One requested sort term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Index into the request's `columns`.
    #[serde(deserialize_with = "index")]
    pub column: usize,
    #[serde(default)]
    pub dir: String,
}

/// A column identifier shared between the client and the column specs.
/// Integer identifiers are kept in their decimal form, so `0` and `"0"` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnKey(pub String);

impl GridRequest {
    /// The global search term, if any.
    pub fn global_search(&self) -> Option<&str> {
        Some(self.search.value.as_str()).filter(|value| !value.is_empty())
    }
}

impl Length {
    pub fn rows(self) -> Option<u64> {
        match self {
            Length::All => None,
            Length::Rows(rows) => Some(rows),
        }
    }
}

impl RequestColumn {
    pub fn is_searchable(&self) -> bool {
        self.searchable == "true"
    }

    pub fn is_orderable(&self) -> bool {
        self.orderable == "true"
    }

    /// The per-column search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.value.as_str()).filter(|value| !value.is_empty())
    }
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        ColumnKey(value.to_string())
    }
}

impl From<usize> for ColumnKey {
    fn from(value: usize) -> Self {
        ColumnKey(value.to_string())
    }
}

impl From<i32> for ColumnKey {
    fn from(value: i32) -> Self {
        ColumnKey(value.to_string())
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ColumnKey(key) = self;
        write!(f, "{key}")
    }
}

// Wire formats //

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrString {
    Integer(i64),
    String(String),
}

impl IntegerOrString {
    fn into_integer<E: de::Error>(self) -> Result<i64, E> {
        match self {
            IntegerOrString::Integer(integer) => Ok(integer),
            IntegerOrString::String(string) => string
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, found {string:?}"))),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

impl<'de> Deserialize<'de> for ColumnKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match IntegerOrString::deserialize(deserializer)? {
            IntegerOrString::Integer(integer) => Ok(ColumnKey(integer.to_string())),
            IntegerOrString::String(string) => Ok(ColumnKey(string)),
        }
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match IntegerOrString::deserialize(deserializer)?.into_integer::<D::Error>()? {
            -1 => Ok(Length::All),
            rows => u64::try_from(rows)
                .map(Length::Rows)
                .map_err(|_| de::Error::custom(format!("invalid page length {rows}"))),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Length::All => serializer.serialize_i64(-1),
            Length::Rows(rows) => serializer.serialize_u64(*rows),
        }
    }
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    IntegerOrString::deserialize(deserializer)?.into_integer()
}

fn index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let index = integer(deserializer)?;
    usize::try_from(index).map_err(|_| de::Error::custom(format!("invalid column index {index}")))
}

fn optional_offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    match Option::<IntegerOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(offset) => {
            let offset = offset.into_integer::<D::Error>()?;
            u64::try_from(offset)
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid offset {offset}")))
        }
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(flag) => Ok(flag.to_string()),
        BoolOrString::String(flag) => Ok(flag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn parses_form_encoded_values() {
        let request: GridRequest = serde_json::from_value(serde_json::json!({
            "draw": "3",
            "start": "20",
            "length": "10",
            "search": { "value": "bob" },
            "columns": [
                { "data": null, "searchable": "false", "orderable": "false", "search": { "value": "" } },
                { "data": "1", "searchable": "true", "orderable": "true", "search": { "value": "" } }
            ],
            "order": [{ "column": "1", "dir": "desc" }]
        }))
        .unwrap();

        assert_eq!(request.draw, 3);
        assert_eq!(request.start, Some(20));
        assert_eq!(request.length, Length::Rows(10));
        assert_eq!(request.global_search(), Some("bob"));
        assert_eq!(request.columns[0].data, None);
        assert_eq!(request.columns[1].data, Some(ColumnKey::from(1)));
        assert!(request.columns[1].is_orderable());
        assert_eq!(request.order[0].column, 1);
    }

    #[test]
    fn parses_json_scalars() {
        let request: GridRequest = serde_json::from_value(serde_json::json!({
            "draw": 1,
            "start": 0,
            "length": -1,
            "columns": [{ "data": 0, "searchable": true, "orderable": false }]
        }))
        .unwrap();

        assert_eq!(request.length, Length::All);
        assert_eq!(request.length.rows(), None);
        assert_eq!(request.global_search(), None);
        assert!(request.columns[0].is_searchable());
        assert!(!request.columns[0].is_orderable());
        assert_eq!(request.columns[0].data, Some(ColumnKey::from("0")));
    }

    #[test]
    fn absent_fields_take_defaults() {
        let request: GridRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, GridRequest::default());
        assert_eq!(request.start, None);
    }

    #[test]
    fn rejects_lengths_below_minus_one() {
        let result = serde_json::from_str::<GridRequest>(r#"{ "length": -2 }"#);
        assert!(result.is_err());
    }
}
