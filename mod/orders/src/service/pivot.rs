//! Company × product pivot of pending quantities.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use orderdesk_core::ServiceError;

use crate::model::PivotData;

use super::reconcile::{DispatchKey, pending_lines};
use super::OrdersService;

impl OrdersService {
    /// Pivot of summed pending quantities, optionally filtered by
    /// comma-separated case-insensitive substring lists.
    pub async fn pivot_data(
        &self,
        product_filter: &str,
        party_filter: &str,
    ) -> Result<PivotData, ServiceError> {
        let dispatch = self.dispatch_map().await?;
        let rows = self.orders_rows().await?;
        Ok(build_pivot(&rows, &dispatch, product_filter, party_filter))
    }

    /// Distinct companies with any pending quantity.
    pub async fn parties_with_pending(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.pivot_data("", "").await?.parties)
    }

    /// Distinct products with any pending quantity.
    pub async fn products_with_pending(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.pivot_data("", "").await?.products)
    }
}

/// Split a comma-separated filter string into lowercase tokens.
/// Tokens are kept verbatim (no trimming), matching how the filters
/// are typed in the UI.
fn substring_filters(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(',')
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// An empty filter list matches everything; otherwise any token must
/// be a substring of the lowercased name.
fn matches_any(filters: &[String], name: &str) -> bool {
    if filters.is_empty() {
        return true;
    }
    let name = name.to_lowercase();
    filters.iter().any(|f| name.contains(f.as_str()))
}

/// Group remaining quantities by exact (company, product) text and
/// lay them out row-major with sorted dimension lists and zero fill.
pub(crate) fn build_pivot(
    rows: &[Vec<String>],
    dispatch: &HashMap<DispatchKey, i64>,
    product_filter: &str,
    party_filter: &str,
) -> PivotData {
    let product_filters = substring_filters(product_filter);
    let party_filters = substring_filters(party_filter);

    let lines = pending_lines(rows, dispatch, |company, product| {
        matches_any(&product_filters, product) && matches_any(&party_filters, company)
    });

    let mut data: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for line in lines {
        *data
            .entry(line.company)
            .or_default()
            .entry(line.product)
            .or_insert(0) += line.remaining;
    }

    let products: Vec<String> = data
        .values()
        .flat_map(|by_product| by_product.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let parties: Vec<String> = data.keys().cloned().collect();
    let pivot = parties
        .iter()
        .map(|party| {
            let by_product = &data[party];
            products
                .iter()
                .map(|product| by_product.get(product).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    PivotData { products, parties, pivot }
}
