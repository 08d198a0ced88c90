//! Sheets API request and response types.
//!
//! These types map directly to the Sheets v4 REST JSON format.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Values
// ============================================================================

/// A `ValueRange` as returned by `values.get`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRangeResponse {
    /// Cell values. Absent when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRangeResponse {
    /// Cells rendered to text.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

/// Body of `values.update` and `values.append`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRangeRequest<'a> {
    /// Always `ROWS`.
    pub major_dimension: &'static str,
    /// Rows to write.
    pub values: &'a [Vec<String>],
}

impl<'a> ValueRangeRequest<'a> {
    /// Row-major body for `values`.
    pub const fn rows(values: &'a [Vec<String>]) -> Self {
        Self {
            major_dimension: "ROWS",
            values,
        }
    }
}

/// Render a returned cell as text. Formatted reads return strings; anything
/// else is rendered, and `null` reads as empty.
pub fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Spreadsheet metadata
// ============================================================================

/// Response of `spreadsheets.get?fields=sheets.properties`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetMetadata {
    /// Sheets in tab order.
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

impl SpreadsheetMetadata {
    /// Id of the sheet with exactly this title.
    pub fn sheet_id(&self, title: &str) -> Option<i64> {
        self.sheets
            .iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id)
    }
}

/// One sheet in the metadata listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    /// Sheet properties.
    pub properties: SheetProperties,
}

/// Identity of a sheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    /// Numeric sheet id. The first sheet of a spreadsheet is usually `0`,
    /// which Google omits from the JSON.
    #[serde(default)]
    pub sheet_id: i64,
    /// Tab title.
    #[serde(default)]
    pub title: String,
}

// ============================================================================
// batchUpdate
// ============================================================================

/// Body of `spreadsheets.batchUpdate`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateRequest {
    /// Requests applied in order.
    pub requests: Vec<BatchRequest>,
}

impl BatchUpdateRequest {
    /// A single `deleteDimension` over rows `[start, end)` of a sheet.
    pub fn delete_rows(sheet_id: i64, start: usize, end: usize) -> Self {
        Self {
            requests: vec![BatchRequest {
                delete_dimension: DeleteDimensionRequest {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "ROWS",
                        start_index: start,
                        end_index: end,
                    },
                },
            }],
        }
    }
}

/// One batch request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    /// Structural delete.
    pub delete_dimension: DeleteDimensionRequest,
}

/// `deleteDimension` request.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteDimensionRequest {
    /// Span to remove.
    pub range: DimensionRange,
}

/// A half-open span of rows or columns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    /// Target sheet.
    pub sheet_id: i64,
    /// `ROWS` or `COLUMNS`.
    pub dimension: &'static str,
    /// First index, 0-based inclusive.
    pub start_index: usize,
    /// Last index, exclusive.
    pub end_index: usize,
}

// ============================================================================
// Errors
// ============================================================================

/// Google API error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorResponse {
    /// Error details.
    pub error: GoogleErrorBody,
}

/// Google API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_range_without_values_is_empty() {
        let resp: ValueRangeResponse =
            serde_json::from_value(json!({"range": "Orders!A2:C1000", "majorDimension": "ROWS"}))
                .unwrap();
        assert!(resp.into_rows().is_empty());
    }

    #[test]
    fn non_string_cells_render_to_text() {
        let resp: ValueRangeResponse =
            serde_json::from_value(json!({"values": [["Kim", 7, true, null]]})).unwrap();
        assert_eq!(resp.into_rows(), vec![vec!["Kim", "7", "true", ""]]);
    }

    #[test]
    fn metadata_resolves_first_sheet_with_omitted_id() {
        let meta: SpreadsheetMetadata = serde_json::from_value(json!({
            "sheets": [
                {"properties": {"title": "Roster", "index": 0}},
                {"properties": {"sheetId": 812_345, "title": "Orders", "index": 1}}
            ]
        }))
        .unwrap();
        assert_eq!(meta.sheet_id("Roster"), Some(0));
        assert_eq!(meta.sheet_id("Orders"), Some(812_345));
        assert_eq!(meta.sheet_id("orders"), None);
    }

    #[test]
    fn delete_rows_body_shape() {
        let body = serde_json::to_value(BatchUpdateRequest::delete_rows(42, 3, 4)).unwrap();
        assert_eq!(
            body,
            json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": 42,
                            "dimension": "ROWS",
                            "startIndex": 3,
                            "endIndex": 4
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn write_body_is_row_major() {
        let rows = vec![vec!["a".to_string(), "b".to_string()]];
        let body = serde_json::to_value(ValueRangeRequest::rows(&rows)).unwrap();
        assert_eq!(body, json!({"majorDimension": "ROWS", "values": [["a", "b"]]}));
    }
}
