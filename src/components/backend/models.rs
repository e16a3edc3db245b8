use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured event record returned by the backend.
///
/// The client never validates its fields: the record is displayed as-is and
/// posted back verbatim to the export endpoints. Key order is preserved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord(Map<String, Value>);

impl EventRecord {
    /// Build a record from any JSON value, if it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The record as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Body of a conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub event_details: String,
}

/// Body of a calendar-link response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarLinkResponse {
    #[serde(default)]
    pub google_calendar_link: Option<String>,
}

/// Calendar file produced by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct IcsDownload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_keeps_key_order() {
        let body = r#"{"summary":"Team Lunch","start":"2024-05-10T12:00:00","end":"2024-05-10T13:00:00","location":"Cafe"}"#;
        let record: EventRecord = serde_json::from_str(body).unwrap();

        let keys: Vec<&str> = record.fields().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["summary", "start", "end", "location"]);

        // Serialized back verbatim
        assert_eq!(serde_json::to_string(&record).unwrap(), body);
    }

    #[test]
    fn test_record_only_wraps_objects() {
        assert!(EventRecord::from_value(json!({"summary": "x"})).is_some());
        assert!(EventRecord::from_value(json!(["summary"])).is_none());
        assert!(EventRecord::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_link_response_tolerates_missing_field() {
        let response: CalendarLinkResponse = serde_json::from_str("{}").unwrap();
        assert!(response.google_calendar_link.is_none());
    }
}
