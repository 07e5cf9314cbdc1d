/// Column layout of the dispatch worksheet.
pub mod col {
    pub const DATE: usize = 0;
    pub const COMPANY: usize = 1;
    pub const PRODUCT: usize = 2;
    pub const QUANTITY: usize = 3;
    pub const SERIAL: usize = 4;
}

/// Header row written when the dispatch worksheet is created.
pub const DISPATCH_HEADER: [&str; 5] = ["Date", "Company", "Product", "Quantity", "Order Number"];

/// A dispatch row as stored in the sheet. Append-only; never updated
/// or deleted. Associates to an order only through the
/// (serial, normalized product) join key recomputed on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRow {
    pub date: String,
    /// Informational only — reconciliation keys on serial + product.
    pub company: String,
    pub product: String,
    pub quantity: String,
    pub serial: String,
}

impl DispatchRow {
    /// Read a dispatch row out of raw sheet cells. Rows too short to
    /// carry the serial column are rejected.
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        if cells.len() < 5 {
            return None;
        }
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Some(Self {
            date: cell(col::DATE),
            company: cell(col::COMPANY),
            product: cell(col::PRODUCT),
            quantity: cell(col::QUANTITY),
            serial: cell(col::SERIAL),
        })
    }
}
