//! History data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tracking::{TrackingData, TrackingResponse};

/// One recorded lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub phone_number: String,
    pub search_date: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TrackingData>,
}

impl HistoryEntry {
    /// Build an entry for a finished lookup, stamped with the current time
    pub fn from_response(phone_number: impl Into<String>, response: &TrackingResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone_number: phone_number.into(),
            search_date: Utc::now(),
            success: response.success,
            data: response.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::generate_profile;

    #[test]
    fn test_entry_mirrors_the_response_outcome() {
        let failure = TrackingResponse::failure("nope", 10);
        let entry = HistoryEntry::from_response("11999998888", &failure);
        assert!(!entry.success);
        assert!(entry.data.is_none());
        assert_eq!(entry.phone_number, "11999998888");

        let success = TrackingResponse::ok(generate_profile("11999998888"), 8300);
        let entry = HistoryEntry::from_response("11999998888", &success);
        assert!(entry.success);
        assert!(entry.data.is_some());
    }

    #[test]
    fn test_entries_get_distinct_ids() {
        let response = TrackingResponse::failure("nope", 0);
        let a = HistoryEntry::from_response("11999998888", &response);
        let b = HistoryEntry::from_response("11999998888", &response);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let response = TrackingResponse::failure("nope", 0);
        let entry = HistoryEntry::from_response("11999998888", &response);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("phoneNumber").is_some());
        assert!(json.get("searchDate").is_some());
        assert!(json.get("data").is_none(), "absent profiles are skipped");
    }
}
