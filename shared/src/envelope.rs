//! Unwrapping strategy for callable function results.
//!
//! Functions answer in one of three shapes and callers never know which in
//! advance:
//!
//! * `{ "data": { "success": true, "data": [...] } }` (handler wrapped its list)
//! * `{ "data": [...] }` (handler returned its list directly)
//! * `[...]` (a bare body)
//!
//! [`Envelope::list`] checks `data.data`, then `data`, then the envelope itself,
//! taking the first candidate that is present and truthy. If that candidate is
//! not an array the result is treated as empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which candidate of the envelope held the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    Nested,
    Data,
    Bare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Envelope(pub Value);

impl Envelope {
    /// Wrap a raw callable response body.
    ///
    /// A `{"result": ...}` body is exposed as `{"data": ...}`, the same way the
    /// callable SDK hands back its result object.
    pub fn from_callable_body(body: Value) -> Self {
        match body {
            Value::Object(mut fields) if fields.contains_key("result") => {
                let result = fields.remove("result").unwrap_or(Value::Null);
                Envelope(serde_json::json!({ "data": result }))
            }
            other => Envelope(other),
        }
    }

    pub fn shape(&self) -> EnvelopeShape {
        let data = self.0.get("data");
        if data.and_then(|data| data.get("data")).is_some_and(is_truthy) {
            EnvelopeShape::Nested
        } else if data.is_some_and(is_truthy) {
            EnvelopeShape::Data
        } else {
            EnvelopeShape::Bare
        }
    }

    /// The candidate selected by the unwrapping priority
    pub fn payload(&self) -> &Value {
        match self.shape() {
            EnvelopeShape::Nested => &self.0["data"]["data"],
            EnvelopeShape::Data => &self.0["data"],
            EnvelopeShape::Bare => &self.0,
        }
    }

    /// The payload as a list, or `None` when the selected candidate is not an array
    pub fn list(&self) -> Option<&[Value]> {
        self.payload().as_array().map(Vec::as_slice)
    }

    /// The payload as a list, with non-array payloads degraded to empty
    pub fn into_list(self) -> Vec<Value> {
        self.list().map(<[Value]>::to_vec).unwrap_or_default()
    }

    /// Decode each list item, skipping items that do not match `T`.
    ///
    /// Returns the decoded items and the number of skipped ones, or `None`
    /// when the payload is not a list at all.
    pub fn decode_list<T: DeserializeOwned>(&self) -> Option<(Vec<T>, usize)> {
        let items = self.list()?;
        let decoded: Vec<T> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect();
        let skipped = items.len() - decoded.len();
        Some((decoded, skipped))
    }
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_shape_wins() {
        let envelope = Envelope(json!({ "data": { "success": true, "data": [1, 2] } }));
        assert_eq!(envelope.shape(), EnvelopeShape::Nested);
        assert_eq!(envelope.into_list(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_data_shape() {
        let envelope = Envelope(json!({ "data": [{ "id": "a" }] }));
        assert_eq!(envelope.shape(), EnvelopeShape::Data);
        assert_eq!(envelope.into_list().len(), 1);
    }

    #[test]
    fn test_bare_array() {
        let envelope = Envelope(json!([{ "id": "a" }, { "id": "b" }]));
        assert_eq!(envelope.shape(), EnvelopeShape::Bare);
        assert_eq!(envelope.into_list().len(), 2);
    }

    #[test]
    fn test_non_array_payload_is_empty() {
        // data.data is truthy but not a list, so data is never consulted
        let envelope = Envelope(json!({ "data": { "data": { "id": "a" } } }));
        assert_eq!(envelope.shape(), EnvelopeShape::Nested);
        assert!(envelope.list().is_none());
        assert!(envelope.into_list().is_empty());

        assert!(Envelope(json!({ "success": false })).into_list().is_empty());
        assert!(Envelope(Value::Null).into_list().is_empty());
    }

    #[test]
    fn test_falsy_nested_data_falls_through() {
        let envelope = Envelope(json!({ "data": { "data": null, "items": [] } }));
        assert_eq!(envelope.shape(), EnvelopeShape::Data);
        assert!(envelope.list().is_none());
    }

    #[test]
    fn test_from_callable_body() {
        let envelope = Envelope::from_callable_body(json!({ "result": { "success": true, "data": [7] } }));
        assert_eq!(envelope.shape(), EnvelopeShape::Nested);
        assert_eq!(envelope.into_list(), vec![json!(7)]);

        let passthrough = Envelope::from_callable_body(json!([1]));
        assert_eq!(passthrough.shape(), EnvelopeShape::Bare);
    }

    #[test]
    fn test_decode_list_skips_mismatches() {
        #[derive(Deserialize)]
        struct Item {
            #[allow(dead_code)]
            id: String,
        }

        let envelope = Envelope(json!({ "data": [{ "id": "a" }, { "id": 3 }, { "id": "c" }] }));
        let (items, skipped) = envelope.decode_list::<Item>().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("0")));
    }
}
