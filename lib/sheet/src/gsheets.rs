//! Google Sheets v4 implementation of [`SheetStore`].
//!
//! Only the handful of endpoints the service needs: values get/update/
//! append, spreadsheet metadata, and addSheet. Every remote call goes
//! through [`with_retry`].

use std::sync::Arc;

use serde::Deserialize;

use crate::a1::col_letter;
use crate::error::SheetError;
use crate::retry::with_retry;
use crate::token::TokenSource;
use crate::traits::{SheetStore, cell_text};

/// Public Google Sheets API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct GoogleSheetStore {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    token_source: Arc<dyn TokenSource>,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

impl GoogleSheetStore {
    pub fn new(
        base_url: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token_source,
        }
    }

    /// URL for a values range, A1 quoted and percent-encoded.
    fn values_url(&self, worksheet: &str, range: Option<&str>) -> String {
        let a1 = match range {
            Some(r) => format!("'{}'!{}", worksheet, r),
            None => format!("'{}'", worksheet),
        };
        format!(
            "{}/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(&a1),
        )
    }

    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, SheetError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Map non-success statuses to `SheetError::Api`.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SheetError> {
        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetError::Api { status: code, message: body });
        }
        Ok(resp)
    }

    async fn get_values(&self, url: &str) -> Result<Vec<Vec<serde_json::Value>>, SheetError> {
        let req = self.authed(self.http.get(url)).await?;
        let resp = Self::check(req.send().await?).await?;
        let vr: ValueRange = resp
            .json()
            .await
            .map_err(|e| SheetError::Decode(format!("value range: {}", e)))?;
        Ok(vr.values)
    }

    async fn worksheet_titles(&self) -> Result<Vec<String>, SheetError> {
        let url = format!(
            "{}/{}?fields=sheets.properties.title",
            self.base_url, self.spreadsheet_id,
        );
        let req = self.authed(self.http.get(&url)).await?;
        let resp = Self::check(req.send().await?).await?;
        let meta: SpreadsheetMeta = resp
            .json()
            .await
            .map_err(|e| SheetError::Decode(format!("spreadsheet meta: {}", e)))?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }
}

#[async_trait::async_trait]
impl SheetStore for GoogleSheetStore {
    async fn read_all(&self, worksheet: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let url = self.values_url(worksheet, None);
        let values = with_retry("values.get", || self.get_values(&url)).await?;
        Ok(values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn read_col(&self, worksheet: &str, col: usize) -> Result<Vec<String>, SheetError> {
        let letter = col_letter(col);
        let url = self.values_url(worksheet, Some(&format!("{}:{}", letter, letter)));
        let values = with_retry("values.get", || self.get_values(&url)).await?;
        Ok(values
            .into_iter()
            .map(|row| row.first().map(cell_text).unwrap_or_default())
            .collect())
    }

    async fn write_range(
        &self,
        worksheet: &str,
        range: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError> {
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(worksheet, Some(range)),
        );
        let body = serde_json::json!({ "values": [cells] });
        with_retry("values.update", || async {
            let req = self.authed(self.http.put(&url).json(&body)).await?;
            Self::check(req.send().await?).await?;
            Ok(())
        })
        .await
    }

    async fn append_row(
        &self,
        worksheet: &str,
        cells: Vec<serde_json::Value>,
    ) -> Result<(), SheetError> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(worksheet, Some("A1")),
        );
        let body = serde_json::json!({ "values": [cells] });
        with_retry("values.append", || async {
            let req = self.authed(self.http.post(&url).json(&body)).await?;
            Self::check(req.send().await?).await?;
            Ok(())
        })
        .await
    }

    async fn has_worksheet(&self, worksheet: &str) -> Result<bool, SheetError> {
        let titles = with_retry("spreadsheets.get", || self.worksheet_titles()).await?;
        Ok(titles.iter().any(|t| t == worksheet))
    }

    async fn add_worksheet(&self, worksheet: &str, rows: u32, cols: u32) -> Result<(), SheetError> {
        let url = format!("{}/{}:batchUpdate", self.base_url, self.spreadsheet_id);
        let body = serde_json::json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": worksheet,
                        "gridProperties": { "rowCount": rows, "columnCount": cols },
                    }
                }
            }]
        });
        with_retry("spreadsheets.batchUpdate", || async {
            let req = self.authed(self.http.post(&url).json(&body)).await?;
            Self::check(req.send().await?).await?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NoAuth;

    fn store() -> GoogleSheetStore {
        GoogleSheetStore::new(DEFAULT_BASE_URL, "sheet-id", Arc::new(NoAuth))
    }

    #[test]
    fn values_url_quotes_and_encodes() {
        let s = store();
        assert_eq!(
            s.values_url("orders", Some("B5:G5")),
            format!("{}/sheet-id/values/%27orders%27%21B5%3AG5", DEFAULT_BASE_URL),
        );
    }

    #[test]
    fn values_url_whole_worksheet() {
        let s = store();
        assert_eq!(
            s.values_url("dispatch", None),
            format!("{}/sheet-id/values/%27dispatch%27", DEFAULT_BASE_URL),
        );
    }
}
