//! Batch dispatch recording.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use orderdesk_core::ServiceError;

use super::OrdersState;

pub fn routes() -> Router<OrdersState> {
    Router::new().route("/dispatch/save", post(save_dispatch))
}

#[derive(Deserialize)]
struct SaveDispatchBody {
    #[serde(default)]
    dispatches: Vec<DispatchItem>,
}

/// One dispatch line. Product and order number may arrive as JSON
/// numbers (the sheet UI is loose about types), so they are
/// stringified rather than typed.
#[derive(Deserialize)]
struct DispatchItem {
    #[serde(default)]
    company: String,
    #[serde(default)]
    product: serde_json::Value,
    #[serde(default)]
    quantity: serde_json::Value,
    #[serde(default)]
    order_number: serde_json::Value,
}

async fn save_dispatch(
    State(state): State<OrdersState>,
    Json(body): Json<SaveDispatchBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ServiceError> {
    let svc = state.svc()?;

    let mut written = 0usize;
    let mut errors: Vec<String> = Vec::new();
    for item in &body.dispatches {
        let serial = value_text(&item.order_number);
        let product = value_text(&item.product);
        let quantity = match value_int(&item.quantity) {
            Ok(q) => q,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        if serial.is_empty() || product.is_empty() || quantity <= 0 {
            continue;
        }
        match svc
            .add_dispatch(item.company.trim(), &product, quantity, &serial)
            .await
        {
            Ok(()) => written += 1,
            Err(e) => errors.push(e.to_string()),
        }
    }

    if written == 0 {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "ok": false,
                "error": "no dispatch rows written",
                "details": errors,
            })),
        ));
    }
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "ok": true, "rows_written": written })),
    ))
}

/// Trimmed text of a loosely typed JSON scalar.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Integer of a loosely typed JSON scalar; floats truncate, numeric
/// strings parse, anything else is an error worth reporting back.
fn value_int(value: &serde_json::Value) -> Result<i64, String> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| format!("bad quantity: {n}")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("bad quantity: {s:?}")),
        serde_json::Value::Null => Ok(0),
        other => Err(format!("bad quantity: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text_handles_loose_types() {
        assert_eq!(value_text(&serde_json::json!(" 1001 ")), "1001");
        assert_eq!(value_text(&serde_json::json!(1001)), "1001");
        assert_eq!(value_text(&serde_json::Value::Null), "");
    }

    #[test]
    fn value_int_handles_loose_types() {
        assert_eq!(value_int(&serde_json::json!(5)).unwrap(), 5);
        assert_eq!(value_int(&serde_json::json!(5.9)).unwrap(), 5);
        assert_eq!(value_int(&serde_json::json!("5")).unwrap(), 5);
        assert_eq!(value_int(&serde_json::Value::Null).unwrap(), 0);
        assert!(value_int(&serde_json::json!("five")).is_err());
        assert!(value_int(&serde_json::json!([1])).is_err());
    }
}
