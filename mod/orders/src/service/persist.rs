//! Writes against the orders and dispatch worksheets.
//!
//! Order rows are addressed by their 1-indexed sheet row. The serial
//! column (A) and the formula column (H) are never touched: "delete"
//! blanks the mutable span B..G so the row stays addressable, and
//! restore rewrites the same span from a caller-supplied snapshot.

use orderdesk_core::{ServiceError, today_iso};
use orderdesk_sheet::a1::row_span;

use crate::model::OrderSnapshot;
use crate::model::order::col;

use super::OrdersService;

/// First data row — row 1 is the header.
const FIRST_DATA_ROW: usize = 2;

fn check_data_row(row: usize) -> Result<(), ServiceError> {
    if row < FIRST_DATA_ROW {
        return Err(ServiceError::Validation(format!("row {row} is not a data row")));
    }
    Ok(())
}

impl OrdersService {
    /// Write a single-row span of the orders worksheet and drop the
    /// read memo.
    async fn write_orders_range(
        &self,
        range: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), ServiceError> {
        self.store
            .write_range(&self.worksheets.orders, range, cells)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.cache.clear().await;
        Ok(())
    }

    /// Insert an order into the first row whose Date cell is blank
    /// (reusing gaps left by soft deletes), or past the last row.
    /// Returns the sheet row written.
    pub async fn add_order(
        &self,
        company: &str,
        product: &str,
        quantity: i64,
        price: f64,
        brand: &str,
    ) -> Result<usize, ServiceError> {
        let rows = self
            .store
            .read_all(&self.worksheets.orders)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut target = None;
        for (i, cells) in rows.iter().enumerate().skip(1) {
            if cells.len() < 2 || cells[col::DATE].trim().is_empty() {
                target = Some(i + 1);
                break;
            }
        }
        let row = target.unwrap_or(rows.len() + 1);

        self.write_orders_range(
            &row_span(col::DATE, col::PRICE, row),
            vec![
                serde_json::json!(today_iso()),
                serde_json::json!(company),
                serde_json::json!(product),
                serde_json::json!(brand),
                serde_json::json!(quantity),
                serde_json::json!(price),
            ],
        )
        .await?;
        Ok(row)
    }

    /// Append a dispatch row against an order serial.
    pub async fn add_dispatch(
        &self,
        company: &str,
        product: &str,
        quantity: i64,
        serial: &str,
    ) -> Result<(), ServiceError> {
        self.store
            .append_row(
                &self.worksheets.dispatch,
                vec![
                    serde_json::json!(today_iso()),
                    serde_json::json!(company),
                    serde_json::json!(product),
                    serde_json::json!(quantity),
                    serde_json::json!(serial),
                ],
            )
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.cache.clear().await;
        Ok(())
    }

    /// Overwrite product/brand/quantity/price in place.
    pub async fn update_order(
        &self,
        row: usize,
        product: &str,
        brand: &str,
        quantity: i64,
        price: f64,
    ) -> Result<(), ServiceError> {
        check_data_row(row)?;
        self.write_orders_range(
            &row_span(col::PRODUCT, col::PRICE, row),
            vec![
                serde_json::json!(product),
                serde_json::json!(brand),
                serde_json::json!(quantity),
                serde_json::json!(price),
            ],
        )
        .await
    }

    /// Soft delete: blank the mutable span, keep serial and formulas.
    pub async fn delete_order(&self, row: usize) -> Result<(), ServiceError> {
        check_data_row(row)?;
        self.write_orders_range(
            &row_span(col::DATE, col::PRICE, row),
            vec![serde_json::json!(""); 6],
        )
        .await
    }

    /// Rewrite a previously blanked row from the caller's snapshot.
    pub async fn restore_order(
        &self,
        row: usize,
        snapshot: &OrderSnapshot,
    ) -> Result<(), ServiceError> {
        check_data_row(row)?;
        self.write_orders_range(
            &row_span(col::DATE, col::PRICE, row),
            vec![
                serde_json::json!(snapshot.date),
                serde_json::json!(snapshot.company),
                serde_json::json!(snapshot.product),
                serde_json::json!(snapshot.brand),
                serde_json::json!(snapshot.quantity),
                serde_json::json!(snapshot.price),
            ],
        )
        .await
    }
}
