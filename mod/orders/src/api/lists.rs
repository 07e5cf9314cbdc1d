//! Reference list endpoints.

use axum::{Json, Router, extract::State, routing::get};

use orderdesk_core::ServiceError;

use super::OrdersState;

pub fn routes() -> Router<OrdersState> {
    Router::new()
        .route("/api/products", get(products))
        .route("/api/companies", get(companies))
        .route("/api/requirements", get(requirements))
}

async fn products(State(state): State<OrdersState>) -> Json<serde_json::Value> {
    let products = match &state.service {
        Some(svc) => svc.load_lists().await.products,
        None => Vec::new(),
    };
    Json(serde_json::json!({ "products": products }))
}

async fn companies(State(state): State<OrdersState>) -> Json<serde_json::Value> {
    let companies = match &state.service {
        Some(svc) => svc.load_lists().await.companies,
        None => Vec::new(),
    };
    Json(serde_json::json!({ "companies": companies }))
}

async fn requirements(
    State(state): State<OrdersState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let requirements = match &state.service {
        Some(svc) => svc.inventory_requirements().await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "requirements": requirements })))
}
