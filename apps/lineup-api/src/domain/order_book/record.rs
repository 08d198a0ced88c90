//! Order records and value objects.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::shared::{RepositoryError, require_non_empty};

/// Unique, case-sensitive name of a saved order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderName(String);

impl OrderName {
    /// Validate and wrap an order name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if `value` is empty.
    pub fn parse(value: &str) -> Result<Self, RepositoryError> {
        require_non_empty("name", value).map(|v| Self(v.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a stored cell holds exactly this name.
    #[must_use]
    pub fn matches(&self, cell: &str) -> bool {
        self.0 == cell
    }
}

impl fmt::Display for OrderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a save time the way it is stored: RFC 3339, millisecond precision, `Z`.
#[must_use]
pub fn format_saved_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Name and save time of a stored order, without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Order name.
    pub order_name: String,
    /// Time of the last save.
    pub saved_at: String,
}

/// A stored order with its decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedOrder {
    /// Order name.
    pub order_name: String,
    /// Time of the last save.
    pub saved_at: String,
    /// Decoded payload, exactly as the caller saved it.
    pub payload: Value,
}

/// Result of deleting an order by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row was removed.
    Deleted,
    /// No row carried the name.
    NotFound,
}

impl DeleteOutcome {
    /// Whether a row was removed.
    #[must_use]
    pub const fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Conventional payload shape written by the lineup editor.
///
/// Never enforced: payloads are stored opaquely and this view is only used
/// for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupPayload {
    /// Players taking part, by name and jersey number.
    #[serde(default)]
    pub players: Vec<RosterEntry>,
    /// Starting positions.
    #[serde(default)]
    pub starting_list: Vec<StartingSlot>,
}

impl LineupPayload {
    /// View an opaque payload in the conventional shape, if it has it.
    #[must_use]
    pub fn view(payload: &Value) -> Option<Self> {
        if !payload.is_object() {
            return None;
        }
        serde_json::from_value(payload.clone()).ok()
    }
}

/// A player listed in a lineup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Player name.
    #[serde(default)]
    pub name: String,
    /// Jersey number.
    #[serde(default)]
    pub num: String,
}

/// A starting position assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingSlot {
    /// Player name.
    #[serde(default)]
    pub name: String,
    /// Fielding position code.
    #[serde(default)]
    pub pos: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn order_name_rejects_empty() {
        assert!(OrderName::parse("").unwrap_err().is_validation());
    }

    #[test]
    fn order_name_match_is_case_sensitive() {
        let name = OrderName::parse("Tigers A").unwrap();
        assert!(name.matches("Tigers A"));
        assert!(!name.matches("tigers a"));
        assert!(!name.matches("Tigers A "));
    }

    #[test]
    fn saved_at_has_millis_and_zulu_suffix() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 15, 0).unwrap();
        assert_eq!(format_saved_at(at), "2025-03-01T09:15:00.000Z");
    }

    #[test]
    fn saved_order_serializes_camel_case() {
        let order = SavedOrder {
            order_name: "Tigers A".to_string(),
            saved_at: "2025-03-01T09:15:00.000Z".to_string(),
            payload: json!({"players": []}),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderName"], "Tigers A");
        assert_eq!(value["savedAt"], "2025-03-01T09:15:00.000Z");
        assert_eq!(value["payload"], json!({"players": []}));
    }

    #[test]
    fn lineup_view_reads_conventional_shape() {
        let payload = json!({
            "players": [{"name": "Kim", "num": "7"}],
            "startingList": [{"name": "Kim", "pos": "P"}]
        });
        let view = LineupPayload::view(&payload).unwrap();
        assert_eq!(view.players.len(), 1);
        assert_eq!(view.starting_list[0].pos, "P");
    }

    #[test]
    fn lineup_view_ignores_other_shapes() {
        assert!(LineupPayload::view(&json!("just text")).is_none());
        assert!(LineupPayload::view(&json!({"players": "nope"})).is_none());
    }
}
