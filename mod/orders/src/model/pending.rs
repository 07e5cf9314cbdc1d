use serde::Serialize;

/// A reconciled order line with outstanding quantity.
///
/// Derived per request from the order and dispatch worksheets; never
/// persisted. `remaining = ordered − dispatched`; pending views only
/// carry lines with `remaining > 0`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PendingLine {
    pub company: String,
    pub product: String,
    pub serial: String,
    pub ordered: i64,
    pub dispatched: i64,
    pub remaining: i64,
    /// Stored price text, carried through unchanged (may be empty).
    pub price: String,
}

/// Company × product matrix of summed pending quantities.
///
/// `pivot[i][j]` is the pending total for `parties[i]` × `products[j]`,
/// zero-filled for absent combinations. Dimension lists are sorted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PivotData {
    pub products: Vec<String>,
    pub parties: Vec<String>,
    pub pivot: Vec<Vec<i64>>,
}

impl PivotData {
    pub fn empty() -> Self {
        Self { products: Vec::new(), parties: Vec::new(), pivot: Vec::new() }
    }
}

/// Reference name lists loaded from the products/companies/brands
/// worksheets.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReferenceLists {
    pub products: Vec<String>,
    pub companies: Vec<String>,
    pub brands: Vec<String>,
}
