//! Player record and its row encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column headers of the roster table, in storage order.
pub const PLAYER_COLUMNS: [&str; 9] = ["name", "num", "p", "c", "1b", "2b", "3b", "ss", "of"];

/// Value stored for an eligibility marker that was not supplied.
const UNMARKED: &str = "0";

/// A roster entry: identity plus six fielding eligibility markers.
///
/// Markers are free text (usually `"0"`/`"1"`) and are never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player name.
    pub name: String,
    /// Jersey number.
    pub num: String,
    /// Pitcher.
    pub p: String,
    /// Catcher.
    pub c: String,
    /// First base.
    #[serde(rename = "1b")]
    pub first_base: String,
    /// Second base.
    #[serde(rename = "2b")]
    pub second_base: String,
    /// Third base.
    #[serde(rename = "3b")]
    pub third_base: String,
    /// Shortstop.
    pub ss: String,
    /// Outfield.
    pub of: String,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: String::new(),
            num: String::new(),
            p: UNMARKED.to_string(),
            c: UNMARKED.to_string(),
            first_base: UNMARKED.to_string(),
            second_base: UNMARKED.to_string(),
            third_base: UNMARKED.to_string(),
            ss: UNMARKED.to_string(),
            of: UNMARKED.to_string(),
        }
    }
}

impl Player {
    /// Decode a stored row. Missing or blank cells take their defaults.
    #[must_use]
    pub fn from_row(row: &[String]) -> Self {
        let cell = |idx: usize, default: &str| {
            row.get(idx)
                .filter(|v| !v.is_empty())
                .map_or_else(|| default.to_string(), Clone::clone)
        };

        Self {
            name: cell(0, ""),
            num: cell(1, ""),
            p: cell(2, UNMARKED),
            c: cell(3, UNMARKED),
            first_base: cell(4, UNMARKED),
            second_base: cell(5, UNMARKED),
            third_base: cell(6, UNMARKED),
            ss: cell(7, UNMARKED),
            of: cell(8, UNMARKED),
        }
    }

    /// Build a player from a loosely-typed JSON object.
    ///
    /// Fields may be strings, numbers or booleans. Absent, `null`, `""`, `0`
    /// and `false` all take the field default; anything else is rendered to
    /// text. A non-object value yields the default player.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str, default: &str| {
            value
                .get(key)
                .and_then(loose_text)
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            name: field("name", ""),
            num: field("num", ""),
            p: field("p", UNMARKED),
            c: field("c", UNMARKED),
            first_base: field("1b", UNMARKED),
            second_base: field("2b", UNMARKED),
            third_base: field("3b", UNMARKED),
            ss: field("ss", UNMARKED),
            of: field("of", UNMARKED),
        }
    }

    /// Encode as a stored row in [`PLAYER_COLUMNS`] order.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.num.clone(),
            self.p.clone(),
            self.c.clone(),
            self.first_base.clone(),
            self.second_base.clone(),
            self.third_base.clone(),
            self.ss.clone(),
            self.of.clone(),
        ]
    }
}

/// Render a JSON value to cell text, or `None` if it is "falsy".
fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        other => Some(other.to_string()),
    }
}
