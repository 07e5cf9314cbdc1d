//! Order intake and row-addressed mutation endpoints.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Form, Query, State},
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use orderdesk_core::ServiceError;

use crate::model::OrderSnapshot;
use crate::service::submit::parse_order_lines;

use super::OrdersState;

pub fn routes() -> Router<OrdersState> {
    Router::new()
        .route("/submit", post(submit))
        .route("/api/recent_orders", get(recent_orders))
        .route("/api/update_order", post(update_order))
        .route("/api/delete_order", post(delete_order))
        .route("/api/undo_delete_order", post(undo_delete_order))
}

/// Form submission from the dashboard. Always redirects back to `/`;
/// the query flag is the flash-message equivalent.
async fn submit(
    State(state): State<OrdersState>,
    Form(form): Form<HashMap<String, String>>,
) -> Redirect {
    let Some(svc) = &state.service else {
        return Redirect::to("/?error=unavailable");
    };
    let company = form.get("company").map(|s| s.trim()).unwrap_or("");
    if company.is_empty() {
        return Redirect::to("/?error=company_required");
    }
    let includes_gst = form.get("includes_gst").map(|s| s == "on").unwrap_or(false);
    let lines = parse_order_lines(&form, includes_gst);

    match svc.submit_order(company, lines).await {
        Ok(outcome) if outcome.duplicate => Redirect::to("/?duplicate=1"),
        Ok(outcome) => Redirect::to(&format!("/?submitted={}", outcome.written)),
        Err(e) => {
            tracing::error!(error = %e, "order submission failed");
            Redirect::to("/?error=submit_failed")
        }
    }
}

#[derive(Deserialize)]
struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    15
}

async fn recent_orders(
    State(state): State<OrdersState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let orders = match &state.service {
        Some(svc) => svc.recent_orders(query.limit).await?,
        None => Vec::new(),
    };
    Ok(Json(serde_json::json!({ "orders": orders })))
}

#[derive(Deserialize)]
struct UpdateOrderBody {
    row: usize,
    product: String,
    #[serde(default)]
    brand: String,
    quantity: i64,
    price: f64,
}

async fn update_order(
    State(state): State<OrdersState>,
    Json(body): Json<UpdateOrderBody>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let svc = state.svc()?;
    if body.product.trim().is_empty() {
        return Err(ServiceError::Validation("product required".into()));
    }
    if body.quantity <= 0 {
        return Err(ServiceError::Validation("quantity must be positive".into()));
    }
    svc.update_order(
        body.row,
        body.product.trim(),
        body.brand.trim(),
        body.quantity,
        body.price,
    )
    .await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
struct DeleteOrderBody {
    row: usize,
}

async fn delete_order(
    State(state): State<OrdersState>,
    Json(body): Json<DeleteOrderBody>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let svc = state.svc()?;
    svc.delete_order(body.row).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Deserialize)]
struct UndoDeleteBody {
    row: usize,
    data: OrderSnapshot,
}

async fn undo_delete_order(
    State(state): State<OrdersState>,
    Json(body): Json<UndoDeleteBody>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let svc = state.svc()?;
    svc.restore_order(body.row, &body.data).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
