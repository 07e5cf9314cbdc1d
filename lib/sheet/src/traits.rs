use crate::error::SheetError;

/// SheetStore provides row-oriented access to a remote spreadsheet.
///
/// Reads return formatted cell text (what the sheet UI shows); writes
/// take JSON cell values so numbers land as numbers. All row and range
/// addressing is 1-indexed A1 notation, matching the sheet UI.
#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    /// All rows of a worksheet, including the header row. Trailing
    /// empty cells may be absent, so rows are not uniform in length.
    async fn read_all(&self, worksheet: &str) -> Result<Vec<Vec<String>>, SheetError>;

    /// A single column (0-based index) top to bottom, including the header.
    async fn read_col(&self, worksheet: &str, col: usize) -> Result<Vec<String>, SheetError>;

    /// Overwrite a single-row A1 span (e.g. `"B5:G5"`) with the given cells.
    async fn write_range(
        &self,
        worksheet: &str,
        range: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError>;

    /// Append a row after the last row with any content.
    async fn append_row(
        &self,
        worksheet: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError>;

    /// Whether a worksheet with this title exists.
    async fn has_worksheet(&self, worksheet: &str) -> Result<bool, SheetError>;

    /// Create an empty worksheet with the given grid size.
    async fn add_worksheet(&self, worksheet: &str, rows: u32, cols: u32) -> Result<(), SheetError>;
}

/// Formatted text for a JSON cell value, the way the sheet renders it.
pub fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
