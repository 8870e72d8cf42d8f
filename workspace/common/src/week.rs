use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive bounds of one week, as ISO-8601 UTC instants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct WeekRangeDto {
    pub start: String,
    pub end: String,
}

impl WeekRangeDto {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: format_instant(start),
            end: format_instant(end),
        }
    }
}

/// Current and previous week boundaries plus the instant the current week rolls over.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct WeekInfoDto {
    pub current_week: WeekRangeDto,
    pub previous_week: WeekRangeDto,
    pub next_reset: String,
}

/// Formats an instant the way every week boundary is exposed: UTC, millisecond precision.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
