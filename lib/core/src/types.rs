/// Get today's date as an ISO `YYYY-MM-DD` string.
///
/// This is the format the sheet's Date column expects; a blank Date
/// cell marks a row as unused or soft-deleted.
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().to_string()
}
