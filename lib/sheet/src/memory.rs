//! In-memory implementation of [`SheetStore`] for tests.
//!
//! Holds each worksheet as a grid of formatted text and honors the
//! same write semantics as the remote store: single-row span writes
//! grow the grid as needed, appends land after the last row with any
//! content.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::a1::parse_row_span;
use crate::error::SheetError;
use crate::traits::{SheetStore, cell_text};

#[derive(Default)]
pub struct MemorySheetStore {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a worksheet with the given rows.
    pub async fn seed<R, C>(&self, worksheet: &str, rows: R)
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = &'static str>,
    {
        let grid = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        self.sheets.lock().await.insert(worksheet.to_string(), grid);
    }

    /// Current grid of a worksheet, for assertions.
    pub async fn snapshot(&self, worksheet: &str) -> Option<Vec<Vec<String>>> {
        self.sheets.lock().await.get(worksheet).cloned()
    }
}

fn last_content_row(grid: &[Vec<String>]) -> usize {
    grid.iter()
        .rposition(|row| row.iter().any(|c| !c.trim().is_empty()))
        .map(|i| i + 1)
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl SheetStore for MemorySheetStore {
    async fn read_all(&self, worksheet: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let sheets = self.sheets.lock().await;
        sheets
            .get(worksheet)
            .cloned()
            .ok_or_else(|| SheetError::WorksheetNotFound(worksheet.to_string()))
    }

    async fn read_col(&self, worksheet: &str, col: usize) -> Result<Vec<String>, SheetError> {
        let sheets = self.sheets.lock().await;
        let grid = sheets
            .get(worksheet)
            .ok_or_else(|| SheetError::WorksheetNotFound(worksheet.to_string()))?;
        Ok(grid
            .iter()
            .map(|row| row.get(col).cloned().unwrap_or_default())
            .collect())
    }

    async fn write_range(
        &self,
        worksheet: &str,
        range: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError> {
        let span = parse_row_span(range)?;
        let mut sheets = self.sheets.lock().await;
        let grid = sheets
            .get_mut(worksheet)
            .ok_or_else(|| SheetError::WorksheetNotFound(worksheet.to_string()))?;

        while grid.len() < span.row {
            grid.push(Vec::new());
        }
        let row = &mut grid[span.row - 1];
        if row.len() <= span.col_end {
            row.resize(span.col_end + 1, String::new());
        }
        for (offset, cell) in cells.iter().enumerate() {
            let col = span.col_start + offset;
            if col > span.col_end {
                break;
            }
            row[col] = cell_text(cell);
        }
        Ok(())
    }

    async fn append_row(
        &self,
        worksheet: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError> {
        let mut sheets = self.sheets.lock().await;
        let grid = sheets
            .get_mut(worksheet)
            .ok_or_else(|| SheetError::WorksheetNotFound(worksheet.to_string()))?;
        let at = last_content_row(grid);
        let row: Vec<String> = cells.iter().map(cell_text).collect();
        grid.truncate(at);
        grid.push(row);
        Ok(())
    }

    async fn has_worksheet(&self, worksheet: &str) -> Result<bool, SheetError> {
        Ok(self.sheets.lock().await.contains_key(worksheet))
    }

    async fn add_worksheet(&self, worksheet: &str, _rows: u32, _cols: u32) -> Result<(), SheetError> {
        self.sheets
            .lock()
            .await
            .entry(worksheet.to_string())
            .or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_range_grows_the_grid() {
        let store = MemorySheetStore::new();
        store.seed("orders", [["Serial", "Date"]]).await;
        store
            .write_range(
                "orders",
                "B5:G5",
                vec![
                    serde_json::json!("2026-08-07"),
                    serde_json::json!("Acme"),
                    serde_json::json!("Widget"),
                    serde_json::json!(""),
                    serde_json::json!(10),
                    serde_json::json!(4.5),
                ],
            )
            .await
            .unwrap();

        let grid = store.snapshot("orders").await.unwrap();
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[4][1], "2026-08-07");
        assert_eq!(grid[4][5], "10");
        assert_eq!(grid[4][6], "4.5");
    }

    #[tokio::test]
    async fn append_lands_after_last_content_row() {
        let store = MemorySheetStore::new();
        store
            .seed("dispatch", [
                ["Date", "Company", "Product", "Quantity", "Order Number"],
                ["2026-08-01", "Acme", "Widget", "5", "1001"],
            ])
            .await;
        store
            .append_row(
                "dispatch",
                vec![
                    serde_json::json!("2026-08-07"),
                    serde_json::json!("Acme"),
                    serde_json::json!("Widget"),
                    serde_json::json!(3),
                    serde_json::json!("1001"),
                ],
            )
            .await
            .unwrap();

        let grid = store.snapshot("dispatch").await.unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[2][3], "3");
    }

    #[tokio::test]
    async fn missing_worksheet_is_an_error() {
        let store = MemorySheetStore::new();
        assert!(matches!(
            store.read_all("nope").await,
            Err(SheetError::WorksheetNotFound(_)),
        ));
    }
}
