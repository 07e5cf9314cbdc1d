pub mod dispatch;
pub mod lists;
pub mod orders;
pub mod pivot;

use std::sync::Arc;

use axum::Router;

use orderdesk_core::ServiceError;

use crate::service::OrdersService;
use crate::service::ratelimit::FixedWindowLimiter;

/// Shared module state.
///
/// `service` is None when the sheet backend failed to initialize —
/// read endpoints then degrade to empty responses and mutations
/// answer 503, but the process stays up.
#[derive(Clone)]
pub struct OrdersState {
    pub service: Option<Arc<OrdersService>>,
    pub limiter: Arc<FixedWindowLimiter>,
}

impl OrdersState {
    pub fn new(service: Option<Arc<OrdersService>>) -> Self {
        Self {
            service,
            limiter: Arc::new(FixedWindowLimiter::default()),
        }
    }

    /// The service, or 503 when the backend never came up.
    pub(crate) fn svc(&self) -> Result<&Arc<OrdersService>, ServiceError> {
        self.service
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable("sheet backend not initialized".into()))
    }

    /// Count a request against the endpoint's rate-limit window.
    pub(crate) async fn guard(&self, key: &str) -> Result<(), ServiceError> {
        if self.limiter.allow(key).await {
            Ok(())
        } else {
            Err(ServiceError::RateLimited(format!("too many {key} requests")))
        }
    }
}

/// Build the orders API router.
pub fn router(state: OrdersState) -> Router {
    Router::new()
        .merge(orders::routes())
        .merge(dispatch::routes())
        .merge(pivot::routes())
        .merge(lists::routes())
        .with_state(state)
}
