//! Tracking data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who is allowed to see a piece of profile information
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
    Everyone,
    Contacts,
    Nobody,
}

/// Geographic coordinates (city base plus jitter)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Coarse location attributed to the number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApproximateLocation {
    pub city: String,
    pub state: String,
    pub country: String,
    pub coordinates: Coordinates,
}

/// Fabricated account metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub has_profile_picture: bool,
    pub has_status: bool,
    pub registration_date: DateTime<Utc>,
    pub is_business_account: bool,
}

/// Activity for a single day of the week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayActivity {
    pub day: String,
    pub hours: u32,
}

/// Weekly usage pattern attributed to the number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPattern {
    pub most_active_hour: u32,
    pub average_online_time: String,
    pub weekly_activity: Vec<DayActivity>,
}

/// Privacy settings attributed to the account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub last_seen_visibility: VisibilityLevel,
    pub profile_picture_visibility: VisibilityLevel,
    pub status_visibility: VisibilityLevel,
}

/// The complete fabricated profile for a phone number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    pub phone_number: String,
    pub is_online: bool,
    /// Always populated; consumers ignore it while `is_online` is true
    pub last_seen: DateTime<Utc>,
    pub approximate_location: ApproximateLocation,
    pub account_info: AccountInfo,
    pub activity_pattern: ActivityPattern,
    pub privacy_settings: PrivacySettings,
}

/// Progress report emitted before each simulated stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchProgress {
    pub step: u32,
    pub total_steps: u32,
    pub message: String,
    pub percentage: u32,
}

/// Lookup request as received from the boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRequest {
    #[serde(default)]
    pub phone_number: String,
    pub country_code: Option<String>,
}

/// Result envelope for a single run. Exactly one of `data`/`error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TrackingData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Elapsed wall-clock time in milliseconds
    pub processing_time: u64,
}

impl TrackingResponse {
    /// Successful envelope carrying a generated profile
    pub fn ok(data: TrackingData, processing_time: u64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            processing_time,
        }
    }

    /// Failure envelope carrying a user-facing message
    pub fn failure(error: impl Into<String>, processing_time: u64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            processing_time,
        }
    }
}
