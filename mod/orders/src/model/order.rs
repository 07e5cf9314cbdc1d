use serde::{Deserialize, Serialize};

/// Column layout of the orders worksheet.
///
/// Column A (Serial) is assigned by a sheet formula and never written
/// by this service; column H (Balance) is a sheet-side formula column,
/// never read. The mutable span is B..G.
pub mod col {
    pub const SERIAL: usize = 0;
    pub const DATE: usize = 1;
    pub const COMPANY: usize = 2;
    pub const PRODUCT: usize = 3;
    pub const BRAND: usize = 4;
    pub const QUANTITY: usize = 5;
    pub const PRICE: usize = 6;
}

/// An order row as stored in the sheet. All cells are kept as the
/// formatted text the sheet returns; numeric interpretation happens
/// at reconciliation time.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    /// 1-indexed sheet row.
    pub row: usize,
    pub serial: String,
    pub date: String,
    pub company: String,
    pub product: String,
    pub brand: String,
    pub quantity: String,
    pub price: String,
}

impl OrderRow {
    /// Read an order row out of raw sheet cells.
    ///
    /// `index` is 0-based into the full value grid (header included),
    /// so the sheet row is `index + 1`. Returns None for rows too
    /// short to carry a Date cell.
    pub fn from_cells(index: usize, cells: &[String]) -> Option<Self> {
        if cells.len() < 2 {
            return None;
        }
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Some(Self {
            row: index + 1,
            serial: cell(col::SERIAL),
            date: cell(col::DATE),
            company: cell(col::COMPANY),
            product: cell(col::PRODUCT),
            brand: cell(col::BRAND),
            quantity: cell(col::QUANTITY),
            price: cell(col::PRICE),
        })
    }

    /// A blank Date cell marks a soft-deleted or not-yet-filled row.
    pub fn is_live(&self) -> bool {
        !self.date.trim().is_empty()
    }
}

/// The previously captured mutable fields of an order row, used to
/// restore a soft-deleted row. The caller is responsible for having
/// retained this — there is no server-side undo buffer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrderSnapshot {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

/// A recent order row as returned by the API, carrying the sheet row
/// for edit/delete targeting. `total` is GST-inclusive
/// (quantity × price × 1.05) when both cells parse.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecentOrder {
    pub row: usize,
    pub serial: String,
    pub date: String,
    pub company: String,
    pub product: String,
    pub brand: String,
    pub quantity: String,
    pub price: String,
    pub total: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_cells_pads_short_rows() {
        let row = OrderRow::from_cells(4, &cells(&["1001", "2026-08-01", "Acme"])).unwrap();
        assert_eq!(row.row, 5);
        assert_eq!(row.serial, "1001");
        assert_eq!(row.company, "Acme");
        assert_eq!(row.product, "");
        assert_eq!(row.price, "");
    }

    #[test]
    fn rows_without_date_cell_are_rejected() {
        assert!(OrderRow::from_cells(1, &cells(&["1001"])).is_none());
        assert!(OrderRow::from_cells(1, &cells(&[])).is_none());
    }

    #[test]
    fn blank_date_means_not_live() {
        let deleted = OrderRow::from_cells(2, &cells(&["1001", "  "])).unwrap();
        assert!(!deleted.is_live());
        let live = OrderRow::from_cells(2, &cells(&["1001", "2026-08-01"])).unwrap();
        assert!(live.is_live());
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let snap = OrderSnapshot {
            date: "2026-08-01".into(),
            company: "Acme".into(),
            product: "Widget".into(),
            brand: "Bright".into(),
            quantity: "10".into(),
            price: "4.5".into(),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: OrderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
