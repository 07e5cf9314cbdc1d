//! Reconciliation views: pending lines, pivot, dimension lists.
//!
//! The pending-line and pivot endpoints sit behind the per-endpoint
//! rate limiter; each request is a full-worksheet scan upstream.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use orderdesk_core::ServiceError;

use crate::model::PivotData;

use super::OrdersState;

pub fn routes() -> Router<OrdersState> {
    Router::new()
        .route("/api/orders_by_product", get(orders_by_product))
        .route("/api/orders_by_party", get(orders_by_party))
        .route("/api/pivot_data", get(pivot_data))
        .route("/api/parties_with_pending", get(parties_with_pending))
        .route("/api/products_with_pending", get(products_with_pending))
}

#[derive(Deserialize)]
struct ProductQuery {
    #[serde(default)]
    product: String,
}

async fn orders_by_product(
    State(state): State<OrdersState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.guard("orders_by_product").await?;
    let orders = match &state.service {
        Some(svc) => svc.orders_by_product(&query.product).await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "orders": orders })))
}

#[derive(Deserialize)]
struct PartyQuery {
    #[serde(default)]
    company: String,
}

async fn orders_by_party(
    State(state): State<OrdersState>,
    Query(query): Query<PartyQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    state.guard("orders_by_party").await?;
    let orders = match &state.service {
        Some(svc) => svc.orders_by_party(&query.company).await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "orders": orders })))
}

#[derive(Deserialize)]
struct PivotQuery {
    #[serde(default)]
    product_filter: String,
    #[serde(default)]
    party_filter: String,
}

async fn pivot_data(
    State(state): State<OrdersState>,
    Query(query): Query<PivotQuery>,
) -> Result<Json<PivotData>, ServiceError> {
    state.guard("pivot_data").await?;
    let pivot = match &state.service {
        Some(svc) => {
            svc.pivot_data(&query.product_filter, &query.party_filter)
                .await?
        }
        None => PivotData::empty(),
    };
    Ok(Json(pivot))
}

async fn parties_with_pending(
    State(state): State<OrdersState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let companies = match &state.service {
        Some(svc) => svc.parties_with_pending().await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "companies": companies })))
}

async fn products_with_pending(
    State(state): State<OrdersState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let products = match &state.service {
        Some(svc) => svc.products_with_pending().await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "products": products })))
}
