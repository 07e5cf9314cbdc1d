//! Order submission: form parsing and duplicate suppression.

use std::collections::HashMap;

use orderdesk_core::ServiceError;
use serde::Serialize;

use super::normalize::norm_company;
use super::OrdersService;

/// Divisor used to strip the tax component from a GST-inclusive price.
pub const GST_DIVISOR: f64 = 1.05;

/// One validated order line from the submission form.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product: String,
    pub brand: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitOutcome {
    /// Order lines persisted to the sheet.
    pub written: usize,
    /// True when the whole submission was suppressed as a rapid
    /// duplicate — nothing was written.
    pub duplicate: bool,
}

/// Parse indexed line items out of the submitted form.
///
/// Lines are keyed `orders[<idx>][product|brand|quantity|price]`. A
/// line is accepted when product is non-empty, quantity parses as a
/// positive integer, and price parses; everything else is skipped
/// silently. With `includes_gst`, price is divided by [`GST_DIVISOR`]
/// and rounded to two decimals.
pub fn parse_order_lines(form: &HashMap<String, String>, includes_gst: bool) -> Vec<OrderLine> {
    let mut lines = Vec::new();
    for key in form.keys() {
        if !key.starts_with("orders[") || !key.contains("[product]") {
            continue;
        }
        let Some(idx) = bracket_index(key) else {
            continue;
        };
        let field = |name: &str| {
            form.get(&format!("orders[{idx}][{name}]"))
                .map(|s| s.trim())
                .unwrap_or("")
        };
        let product = field("product");
        let brand = field("brand");
        let quantity = field("quantity");
        let price = field("price");
        if product.is_empty() || quantity.is_empty() || price.is_empty() {
            continue;
        }
        let Ok(quantity) = quantity.parse::<i64>() else {
            continue;
        };
        if quantity <= 0 {
            continue;
        }
        let Ok(mut price) = price.parse::<f64>() else {
            continue;
        };
        if includes_gst {
            price = (price / GST_DIVISOR * 100.0).round() / 100.0;
        }
        lines.push(OrderLine {
            product: product.to_string(),
            brand: brand.to_string(),
            quantity,
            price,
        });
    }
    lines
}

fn bracket_index(key: &str) -> Option<&str> {
    let start = key.find('[')? + 1;
    let end = key.find(']')?;
    key.get(start..end)
}

/// Canonical fingerprint of a submission: normalized company plus the
/// sorted set of line tuples. Line order in the form does not matter.
pub fn submission_fingerprint(company: &str, lines: &[OrderLine]) -> String {
    let mut parts: Vec<String> = lines
        .iter()
        .map(|l| format!("{}|{}|{}|{:.2}", l.product, l.brand, l.quantity, l.price))
        .collect();
    parts.sort();
    format!("{}::{}", norm_company(company), parts.join(";"))
}

impl OrdersService {
    /// Persist parsed order lines, suppressing rapid duplicates.
    ///
    /// Per-line write failures are logged and skipped; the outcome
    /// reports how many lines actually landed.
    pub async fn submit_order(
        &self,
        company: &str,
        lines: Vec<OrderLine>,
    ) -> Result<SubmitOutcome, ServiceError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(ServiceError::Validation("company required".into()));
        }
        if lines.is_empty() {
            return Ok(SubmitOutcome { written: 0, duplicate: false });
        }

        let fingerprint = submission_fingerprint(company, &lines);
        if self.recent.check_and_record(&fingerprint).await {
            tracing::info!(company, "duplicate submission suppressed");
            return Ok(SubmitOutcome { written: 0, duplicate: true });
        }

        let mut written = 0;
        for line in &lines {
            match self
                .add_order(company, &line.product, line.quantity, line.price, &line.brand)
                .await
            {
                Ok(row) => {
                    written += 1;
                    tracing::debug!(row, product = %line.product, "order line written");
                }
                Err(e) => {
                    tracing::warn!(product = %line.product, error = %e, "order line failed");
                }
            }
        }
        Ok(SubmitOutcome { written, duplicate: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_indexed_lines() {
        let f = form(&[
            ("company", "Acme"),
            ("orders[0][product]", "Widget"),
            ("orders[0][brand]", "Bright"),
            ("orders[0][quantity]", "10"),
            ("orders[0][price]", "4.5"),
            ("orders[3][product]", "Gadget"),
            ("orders[3][brand]", ""),
            ("orders[3][quantity]", "2"),
            ("orders[3][price]", "9"),
        ]);
        let mut lines = parse_order_lines(&f, false);
        lines.sort_by(|a, b| a.product.cmp(&b.product));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].product, "Widget");
        assert_eq!(lines[1].quantity, 10);
        assert_eq!(lines[0].brand, "");
    }

    #[test]
    fn rejects_incomplete_or_invalid_lines() {
        let f = form(&[
            ("orders[0][product]", ""),
            ("orders[0][quantity]", "10"),
            ("orders[0][price]", "4.5"),
            ("orders[1][product]", "Widget"),
            ("orders[1][quantity]", "0"),
            ("orders[1][price]", "4.5"),
            ("orders[2][product]", "Widget"),
            ("orders[2][quantity]", "-2"),
            ("orders[2][price]", "4.5"),
            ("orders[3][product]", "Widget"),
            ("orders[3][quantity]", "ten"),
            ("orders[3][price]", "4.5"),
            ("orders[4][product]", "Widget"),
            ("orders[4][quantity]", "10"),
            ("orders[4][price]", ""),
        ]);
        assert!(parse_order_lines(&f, false).is_empty());
    }

    #[test]
    fn gst_divides_and_rounds_to_two_decimals() {
        let f = form(&[
            ("orders[0][product]", "Widget"),
            ("orders[0][quantity]", "1"),
            ("orders[0][price]", "105"),
        ]);
        let lines = parse_order_lines(&f, true);
        assert_eq!(lines[0].price, 100.0);

        let f = form(&[
            ("orders[0][product]", "Widget"),
            ("orders[0][quantity]", "1"),
            ("orders[0][price]", "10"),
        ]);
        let lines = parse_order_lines(&f, true);
        assert_eq!(lines[0].price, 9.52);
    }

    #[test]
    fn fingerprint_ignores_line_order_and_company_format() {
        let a = OrderLine { product: "Widget".into(), brand: "".into(), quantity: 10, price: 4.5 };
        let b = OrderLine { product: "Gadget".into(), brand: "X".into(), quantity: 2, price: 9.0 };
        let fp1 = submission_fingerprint("A & B Co", &[a.clone(), b.clone()]);
        let fp2 = submission_fingerprint("a&bco", &[b, a]);
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn fingerprint_distinguishes_quantities() {
        let a = OrderLine { product: "Widget".into(), brand: "".into(), quantity: 10, price: 4.5 };
        let mut b = a.clone();
        b.quantity = 11;
        assert_ne!(
            submission_fingerprint("Acme", &[a]),
            submission_fingerprint("Acme", &[b]),
        );
    }
}
