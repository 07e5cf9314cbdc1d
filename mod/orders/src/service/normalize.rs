//! Comparison keys for free-text names.
//!
//! The sheet is hand-edited, so "Widget Pro" / "widgetpro" and
//! "A & B Co" / "a&bco" must compare equal. Normalization is
//! deterministic and not configurable.

/// Generic name key: trim, lowercase, drop all spaces.
pub fn norm(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "")
}

/// Company name key: like [`norm`], with `&` collapsed to `and`.
pub fn norm_company(s: &str) -> String {
    s.trim().to_lowercase().replace('&', "and").replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_drops_case_and_spaces() {
        assert_eq!(norm("  Widget Pro "), "widgetpro");
        assert_eq!(norm("widgetpro"), "widgetpro");
    }

    #[test]
    fn norm_company_collapses_ampersand() {
        assert_eq!(norm_company("A & B Co"), "aandbco");
        assert_eq!(norm_company("a&bco"), "aandbco");
    }

    #[test]
    fn normalization_is_idempotent() {
        for s in ["A & B Co", "  Widget Pro ", "already-normal"] {
            assert_eq!(norm(&norm(s)), norm(s));
            assert_eq!(norm_company(&norm_company(s)), norm_company(s));
        }
    }
}
