pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use orderdesk_core::Module;

use api::OrdersState;
use service::OrdersService;

/// Orders module — order intake, dispatch recording, and the
/// reconciliation views over both.
pub struct OrdersModule {
    state: OrdersState,
}

impl OrdersModule {
    /// `service` is None when the sheet backend failed to initialize;
    /// the module then serves degraded responses instead of crashing.
    pub fn new(service: Option<OrdersService>) -> Self {
        Self {
            state: OrdersState::new(service.map(Arc::new)),
        }
    }
}

impl Module for OrdersModule {
    fn name(&self) -> &str {
        "orders"
    }

    fn routes(&self) -> Router {
        api::router(self.state.clone())
    }
}
