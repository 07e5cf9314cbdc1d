//! Read-side views that are not reconciliation: reference lists,
//! recent orders, inventory requirements.

use orderdesk_core::ServiceError;

use crate::model::{OrderRow, RecentOrder, ReferenceLists, Requirement};

use super::submit::GST_DIVISOR;
use super::{CACHE_KEY_REQUIREMENTS, OrdersService};

impl OrdersService {
    /// Reference name lists. A missing or unreadable worksheet yields
    /// an empty list — the dashboard must render regardless.
    pub async fn load_lists(&self) -> ReferenceLists {
        ReferenceLists {
            products: self.name_list(&self.worksheets.products).await,
            companies: self.name_list(&self.worksheets.companies).await,
            brands: self.name_list(&self.worksheets.brands).await,
        }
    }

    async fn name_list(&self, worksheet: &str) -> Vec<String> {
        match self.store.read_col(worksheet, 0).await {
            Ok(col) => col
                .into_iter()
                .skip(1)
                .filter(|name| !name.trim().is_empty())
                .collect(),
            Err(e) => {
                tracing::warn!(worksheet, error = %e, "reference list unavailable");
                Vec::new()
            }
        }
    }

    /// Live order rows, newest first, carrying the sheet row for
    /// edit/delete targeting. `total` is GST-inclusive when both
    /// quantity and price parse.
    pub async fn recent_orders(&self, limit: usize) -> Result<Vec<RecentOrder>, ServiceError> {
        let rows = self.orders_rows().await?;
        let mut out = Vec::new();
        for (index, cells) in rows.iter().enumerate().skip(1) {
            let Some(order) = OrderRow::from_cells(index, cells) else {
                continue;
            };
            if !order.is_live() {
                continue;
            }
            let total = match (order.quantity.parse::<f64>(), order.price.parse::<f64>()) {
                (Ok(q), Ok(p)) => Some(q * p * GST_DIVISOR),
                _ => None,
            };
            out.push(RecentOrder {
                row: order.row,
                serial: order.serial,
                date: order.date,
                company: order.company,
                product: order.product,
                brand: order.brand,
                quantity: order.quantity,
                price: order.price,
                total,
            });
        }
        out.reverse();
        out.truncate(limit);
        Ok(out)
    }

    /// Rows of the requirement worksheet, keyed by its header.
    pub async fn inventory_requirements(&self) -> Result<Vec<Requirement>, ServiceError> {
        let rows = match self.cache.get(CACHE_KEY_REQUIREMENTS).await {
            Some(rows) => rows,
            None => {
                let rows = self
                    .store
                    .read_all(&self.worksheets.requirement)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                self.cache.put(CACHE_KEY_REQUIREMENTS, rows).await
            }
        };

        let Some(header) = rows.first() else {
            return Ok(Vec::new());
        };
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let product = find("product");
        let width = find("width");
        let thickness = find("thickness");
        let weight = find("weight");

        let cell = |cells: &[String], idx: Option<usize>| {
            idx.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
        };
        Ok(rows
            .iter()
            .skip(1)
            .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
            .map(|cells| Requirement {
                product: cell(cells, product),
                width: cell(cells, width),
                thickness: cell(cells, thickness),
                weight: cell(cells, weight),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orderdesk_sheet::MemorySheetStore;

    use crate::service::WorksheetNames;

    use super::*;

    async fn service(store: Arc<MemorySheetStore>) -> OrdersService {
        OrdersService::new(store, WorksheetNames::default())
    }

    #[tokio::test]
    async fn load_lists_skips_header_and_tolerates_missing_sheets() {
        let store = Arc::new(MemorySheetStore::new());
        store
            .seed("products", [["Product"], ["Widget"], ["Gadget"], [""]])
            .await;
        store.seed("companies", [["Company"], ["Acme"]]).await;
        // No brands worksheet at all.
        let svc = service(store).await;

        let lists = svc.load_lists().await;
        assert_eq!(lists.products, vec!["Widget", "Gadget"]);
        assert_eq!(lists.companies, vec!["Acme"]);
        assert!(lists.brands.is_empty());
    }

    #[tokio::test]
    async fn recent_orders_are_newest_first_with_gst_total() {
        let store = Arc::new(MemorySheetStore::new());
        store
            .seed("orders", [
                ["Serial", "Date", "Company", "Product", "Brand", "Quantity", "Price"],
                ["1001", "2026-08-01", "Acme", "Widget", "", "10", "4"],
                ["1002", "", "", "", "", "", ""],
                ["1003", "2026-08-03", "Borealis", "Gadget", "", "2", ""],
            ])
            .await;
        let svc = service(store).await;

        let recent = svc.recent_orders(15).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].row, 4);
        assert_eq!(recent[0].serial, "1003");
        assert_eq!(recent[0].total, None);
        assert_eq!(recent[1].row, 2);
        assert_eq!(recent[1].total, Some(42.0));

        let capped = svc.recent_orders(1).await.unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].serial, "1003");
    }

    #[tokio::test]
    async fn requirements_map_by_header_name() {
        let store = Arc::new(MemorySheetStore::new());
        store
            .seed("requirement", [
                ["Product", "Width", "Thickness", "Weight"],
                ["Widget", "120", "0.5", "2.4"],
                ["", "", "", ""],
            ])
            .await;
        let svc = service(store).await;

        let reqs = svc.inventory_requirements().await.unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].product, "Widget");
        assert_eq!(reqs[0].weight, "2.4");
    }
}
