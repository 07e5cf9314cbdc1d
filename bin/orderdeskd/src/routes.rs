//! Route registration — module routes + system endpoints and pages.

use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tracing::info;

/// Build the complete router with all routes.
pub fn build_router(sheets_initialized: bool, module_routes: Vec<(&str, Router)>) -> Router {
    let mut app = Router::new()
        .route("/", get(index_page))
        .route("/orders", get(orders_page))
        .route("/dispatch", get(dispatch_page))
        .route(
            "/_health",
            get(move || async move { health(sheets_initialized) }),
        );

    for (name, router) in module_routes {
        info!(module = name, "mounting module routes");
        app = app.merge(router);
    }
    app
}

async fn index_page() -> impl IntoResponse {
    Html(include_str!("web/index.html"))
}

async fn orders_page() -> impl IntoResponse {
    Html(include_str!("web/orders.html"))
}

async fn dispatch_page() -> impl IntoResponse {
    Html(include_str!("web/dispatch.html"))
}

fn health(sheets_initialized: bool) -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "sheets_initialized": sheets_initialized,
    }))
}
