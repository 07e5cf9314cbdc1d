//! Ordered-vs-dispatched reconciliation.
//!
//! Everything here is recomputed from full-worksheet scans on every
//! request; there is no persisted derived state. Malformed rows are
//! skipped silently, never surfaced per line.

use std::collections::HashMap;

use orderdesk_core::ServiceError;

use crate::model::{DispatchRow, OrderRow, PendingLine};

use super::normalize::{norm, norm_company};
use super::{OrdersService, parse_qty};

/// Join key between order and dispatch rows: (serial, normalized
/// product). Not a foreign key — recomputed on every read.
pub(crate) type DispatchKey = (String, String);

impl OrdersService {
    /// Total dispatched quantity per (serial, normalized product).
    ///
    /// Reads the dispatch worksheet uncached: dispatch rows are
    /// append-only and the scan is the cheap half of reconciliation.
    pub(crate) async fn dispatch_map(&self) -> Result<HashMap<DispatchKey, i64>, ServiceError> {
        let rows = self
            .store
            .read_all(&self.worksheets.dispatch)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(dispatch_totals(&rows))
    }

    /// Pending lines for one company, matched by normalized name.
    pub async fn orders_by_party(&self, company: &str) -> Result<Vec<PendingLine>, ServiceError> {
        let target = norm_company(company);
        let dispatch = self.dispatch_map().await?;
        let rows = self.orders_rows().await?;
        Ok(pending_lines(&rows, &dispatch, |party, _| norm_company(party) == target))
    }

    /// Pending lines for one product, matched by normalized name.
    pub async fn orders_by_product(&self, product: &str) -> Result<Vec<PendingLine>, ServiceError> {
        let target = norm(product);
        let dispatch = self.dispatch_map().await?;
        let rows = self.orders_rows().await?;
        Ok(pending_lines(&rows, &dispatch, |_, prod| norm(prod) == target))
    }
}

/// Fold dispatch rows into per-key totals. Rows with a missing serial
/// or product, or an unparsable quantity, are skipped.
pub(crate) fn dispatch_totals(rows: &[Vec<String>]) -> HashMap<DispatchKey, i64> {
    let mut totals = HashMap::new();
    for cells in rows.iter().skip(1) {
        let Some(row) = DispatchRow::from_cells(cells) else {
            continue;
        };
        let Some(qty) = parse_qty(&row.quantity) else {
            continue;
        };
        let serial = row.serial.trim().to_string();
        let product = norm(&row.product);
        if serial.is_empty() || product.is_empty() {
            continue;
        }
        *totals.entry((serial, product)).or_insert(0) += qty;
    }
    totals
}

/// One pass over the orders grid: for every live row that `keep`
/// accepts, compute `remaining = ordered − dispatched` and emit the
/// line when remaining is positive.
///
/// `keep` receives the trimmed company and the raw product text.
pub(crate) fn pending_lines(
    rows: &[Vec<String>],
    dispatch: &HashMap<DispatchKey, i64>,
    mut keep: impl FnMut(&str, &str) -> bool,
) -> Vec<PendingLine> {
    let mut out = Vec::new();
    for (index, cells) in rows.iter().enumerate().skip(1) {
        if cells.len() < 6 {
            continue;
        }
        let Some(order) = OrderRow::from_cells(index, cells) else {
            continue;
        };
        if !order.is_live() {
            continue;
        }
        let company = order.company.trim();
        if !keep(company, &order.product) {
            continue;
        }
        let serial = order.serial.trim().to_string();
        let ordered = parse_qty(&order.quantity).unwrap_or(0);
        let dispatched = dispatch
            .get(&(serial.clone(), norm(&order.product)))
            .copied()
            .unwrap_or(0);
        let remaining = ordered - dispatched;
        if remaining <= 0 {
            continue;
        }
        out.push(PendingLine {
            company: company.to_string(),
            product: order.product,
            serial,
            ordered,
            dispatched,
            remaining,
            price: order.price,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn orders_header() -> &'static [&'static str] {
        &["Serial", "Date", "Company", "Product", "Brand", "Quantity", "Price"]
    }

    fn dispatch_header() -> &'static [&'static str] {
        &["Date", "Company", "Product", "Quantity", "Order Number"]
    }

    #[test]
    fn dispatch_totals_sum_per_key() {
        let rows = grid(&[
            dispatch_header(),
            &["2026-08-01", "Acme", "Widget", "25", "1001"],
            &["2026-08-02", "Acme", "widget ", "15", "1001"],
            &["2026-08-02", "Acme", "Widget", "5", "1002"],
        ]);
        let totals = dispatch_totals(&rows);
        assert_eq!(totals[&("1001".to_string(), "widget".to_string())], 40);
        assert_eq!(totals[&("1002".to_string(), "widget".to_string())], 5);
    }

    #[test]
    fn dispatch_totals_skip_malformed_rows() {
        let rows = grid(&[
            dispatch_header(),
            &["2026-08-01", "Acme", "Widget", "not-a-number", "1001"],
            &["2026-08-01", "Acme", "", "5", "1001"],
            &["2026-08-01", "Acme", "Widget", "5", ""],
            &["2026-08-01", "Acme", "Widget", "5"],
        ]);
        assert!(dispatch_totals(&rows).is_empty());
    }

    #[test]
    fn remaining_is_ordered_minus_dispatched() {
        // The worked example: 100 ordered, 40 dispatched → 60 pending;
        // a further 60 dispatched → excluded.
        let orders = grid(&[
            orders_header(),
            &["1001", "2026-08-01", "Acme", "Widget", "", "100", "4.5"],
        ]);
        let mut dispatch = HashMap::new();
        dispatch.insert(("1001".to_string(), "widget".to_string()), 40);

        let lines = pending_lines(&orders, &dispatch, |_, _| true);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].ordered, 100);
        assert_eq!(lines[0].dispatched, 40);
        assert_eq!(lines[0].remaining, 60);

        dispatch.insert(("1001".to_string(), "widget".to_string()), 100);
        assert!(pending_lines(&orders, &dispatch, |_, _| true).is_empty());
    }

    #[test]
    fn over_dispatch_is_hidden() {
        let orders = grid(&[
            orders_header(),
            &["1001", "2026-08-01", "Acme", "Widget", "", "10", ""],
        ]);
        let mut dispatch = HashMap::new();
        dispatch.insert(("1001".to_string(), "widget".to_string()), 12);
        assert!(pending_lines(&orders, &dispatch, |_, _| true).is_empty());
    }

    #[test]
    fn blank_date_and_short_rows_are_excluded() {
        let orders = grid(&[
            orders_header(),
            &["1001", "", "Acme", "Widget", "", "100", "4.5"],
            &["1002", "2026-08-01", "Acme"],
        ]);
        assert!(pending_lines(&orders, &HashMap::new(), |_, _| true).is_empty());
    }

    #[test]
    fn unparsable_ordered_counts_as_zero() {
        let orders = grid(&[
            orders_header(),
            &["1001", "2026-08-01", "Acme", "Widget", "", "ten", "4.5"],
        ]);
        // ordered 0 → remaining 0 → excluded.
        assert!(pending_lines(&orders, &HashMap::new(), |_, _| true).is_empty());
    }

    #[test]
    fn price_less_rows_stay_pending() {
        let orders = grid(&[
            orders_header(),
            &["1001", "2026-08-01", "Acme", "Widget", "", "10", ""],
        ]);
        let lines = pending_lines(&orders, &HashMap::new(), |_, _| true);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].price, "");
    }
}
