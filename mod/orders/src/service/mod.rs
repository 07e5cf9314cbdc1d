pub mod cache;
pub mod dedup;
pub mod normalize;
pub mod persist;
pub mod pivot;
pub mod ratelimit;
pub mod reads;
pub mod reconcile;
pub mod submit;

use std::sync::Arc;
use std::time::Duration;

use orderdesk_core::ServiceError;
use orderdesk_sheet::SheetStore;

use crate::model::DISPATCH_HEADER;

use self::cache::ReadCache;
use self::dedup::RecentSubmissions;

pub(crate) const CACHE_KEY_ORDERS: &str = "orders_rows";
pub(crate) const CACHE_KEY_REQUIREMENTS: &str = "requirements_rows";

/// Full-sheet reads are memoized this long; any write clears the memo.
const CACHE_TTL: Duration = Duration::from_secs(15);

/// Duplicate-submission suppression horizon and history bound.
const DEDUP_HORIZON: Duration = Duration::from_secs(5);
const DEDUP_CAPACITY: usize = 200;

/// Worksheet titles, configurable per deployment.
#[derive(Debug, Clone)]
pub struct WorksheetNames {
    pub orders: String,
    pub dispatch: String,
    pub products: String,
    pub companies: String,
    pub brands: String,
    pub requirement: String,
}

impl Default for WorksheetNames {
    fn default() -> Self {
        Self {
            orders: "orders".to_string(),
            dispatch: "dispatch".to_string(),
            products: "products".to_string(),
            companies: "companies".to_string(),
            brands: "brands".to_string(),
            requirement: "requirement".to_string(),
        }
    }
}

/// Orders service — holds the sheet store and the in-process
/// components (read cache, recent-submission history). All reads are
/// full-worksheet scans; all state lives in the remote sheet.
pub struct OrdersService {
    pub(crate) store: Arc<dyn SheetStore>,
    pub(crate) worksheets: WorksheetNames,
    pub(crate) cache: ReadCache,
    pub(crate) recent: RecentSubmissions,
}

impl OrdersService {
    pub fn new(store: Arc<dyn SheetStore>, worksheets: WorksheetNames) -> Self {
        Self {
            store,
            worksheets,
            cache: ReadCache::new(CACHE_TTL),
            recent: RecentSubmissions::new(DEDUP_HORIZON, DEDUP_CAPACITY),
        }
    }

    /// Create the dispatch worksheet with its header row if missing.
    pub async fn ensure_dispatch_worksheet(&self) -> Result<(), ServiceError> {
        let ws = &self.worksheets.dispatch;
        let exists = self
            .store
            .has_worksheet(ws)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        if exists {
            return Ok(());
        }
        self.store
            .add_worksheet(ws, 1000, 10)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let header = DISPATCH_HEADER.iter().map(|h| serde_json::json!(h)).collect();
        self.store
            .append_row(ws, header)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        tracing::info!(worksheet = %ws, "created dispatch worksheet");
        Ok(())
    }

    /// The full orders grid, memoized per [`CACHE_TTL`].
    pub(crate) async fn orders_rows(&self) -> Result<Arc<Vec<Vec<String>>>, ServiceError> {
        if let Some(rows) = self.cache.get(CACHE_KEY_ORDERS).await {
            return Ok(rows);
        }
        let rows = self
            .store
            .read_all(&self.worksheets.orders)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(self.cache.put(CACHE_KEY_ORDERS, rows).await)
    }
}

/// Parse a quantity cell the way the sheet formats it: float text,
/// truncated toward zero. Blank or unparsable cells yield None.
pub(crate) fn parse_qty(s: &str) -> Option<i64> {
    s.trim().parse::<f64>().ok().map(|f| f as i64)
}
