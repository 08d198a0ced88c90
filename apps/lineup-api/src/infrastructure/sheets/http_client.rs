//! HTTP client wrapper for the Sheets v4 API.

use std::fmt;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::api_types::{
    BatchUpdateRequest, GoogleErrorResponse, SpreadsheetMetadata, ValueRangeRequest,
    ValueRangeResponse,
};
use super::config::SheetsConfig;
use super::error::SheetsError;

const VALUE_INPUT_OPTION: &str = "valueInputOption";

/// HTTP client bound to one spreadsheet.
#[derive(Clone)]
pub struct SheetsHttpClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    access_token: String,
}

impl fmt::Debug for SheetsHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsHttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("spreadsheet_id", &self.spreadsheet_id)
            .finish_non_exhaustive()
    }
}

impl SheetsHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &SheetsConfig) -> Result<Self, SheetsError> {
        if config.spreadsheet_id.is_empty() {
            return Err(SheetsError::Config("spreadsheet id is empty".to_string()));
        }
        if config.access_token.is_empty() {
            return Err(SheetsError::Config("access token is empty".to_string()));
        }

        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| SheetsError::Config(format!("{}: {e}", config.api_base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::Config(format!(
                "{} cannot be used as a base URL",
                config.api_base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SheetsError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// `GET /v4/spreadsheets/{id}/values/{range}`
    pub async fn get_values(&self, range: &str) -> Result<ValueRangeResponse, SheetsError> {
        let url = self.values_url(range, None);
        self.send(self.client.get(url)).await
    }

    /// `PUT /v4/spreadsheets/{id}/values/{range}?valueInputOption={input}`
    pub async fn update_values(
        &self,
        range: &str,
        rows: &[Vec<String>],
        input: &str,
    ) -> Result<(), SheetsError> {
        let mut url = self.values_url(range, None);
        url.query_pairs_mut().append_pair(VALUE_INPUT_OPTION, input);

        let request = self.client.put(url).json(&ValueRangeRequest::rows(rows));
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    /// `POST /v4/spreadsheets/{id}/values/{range}:append?valueInputOption={input}`
    pub async fn append_values(
        &self,
        range: &str,
        rows: &[Vec<String>],
        input: &str,
    ) -> Result<(), SheetsError> {
        let mut url = self.values_url(range, Some("append"));
        url.query_pairs_mut().append_pair(VALUE_INPUT_OPTION, input);

        let request = self.client.post(url).json(&ValueRangeRequest::rows(rows));
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    /// `POST /v4/spreadsheets/{id}/values/{range}:clear`
    pub async fn clear_values(&self, range: &str) -> Result<(), SheetsError> {
        let url = self.values_url(range, Some("clear"));
        let request = self.client.post(url).json(&serde_json::json!({}));
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    /// `GET /v4/spreadsheets/{id}?fields=sheets.properties`
    pub async fn metadata(&self) -> Result<SpreadsheetMetadata, SheetsError> {
        let mut url = self.spreadsheet_url(None);
        url.query_pairs_mut().append_pair("fields", "sheets.properties");
        self.send(self.client.get(url)).await
    }

    /// `POST /v4/spreadsheets/{id}:batchUpdate`
    pub async fn batch_update(&self, body: &BatchUpdateRequest) -> Result<(), SheetsError> {
        let url = self.spreadsheet_url(Some("batchUpdate"));
        let _: serde_json::Value = self.send(self.client.post(url).json(body)).await?;
        Ok(())
    }

    fn spreadsheet_url(&self, method: Option<&str>) -> Url {
        let id = method.map_or_else(
            || self.spreadsheet_id.clone(),
            |m| format!("{}:{m}", self.spreadsheet_id),
        );
        self.url_with_segments(&["v4", "spreadsheets", &id])
    }

    fn values_url(&self, range: &str, method: Option<&str>) -> Url {
        let range = method.map_or_else(|| range.to_string(), |m| format!("{range}:{m}"));
        self.url_with_segments(&["v4", "spreadsheets", &self.spreadsheet_id, "values", &range])
    }

    /// Append percent-encoded path segments to the base URL.
    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        if status.is_success() {
            let body = if text.is_empty() { "null" } else { text.as_str() };
            return serde_json::from_str(body).map_err(|e| SheetsError::JsonParse(e.to_string()));
        }

        let message = match serde_json::from_str::<GoogleErrorResponse>(&text) {
            Ok(err) if !err.error.message.is_empty() => err.error.message,
            _ if text.is_empty() => status.to_string(),
            _ => text,
        };

        tracing::warn!(status = status.as_u16(), message = %message, "Sheets API error");

        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SheetsHttpClient {
        let config = SheetsConfig::new("sheet-1".to_string(), "token".to_string()).with_base_url(base);
        SheetsHttpClient::new(&config).unwrap()
    }

    #[test]
    fn rejects_empty_token() {
        let config = SheetsConfig::new("sheet-1".to_string(), String::new());
        assert!(matches!(SheetsHttpClient::new(&config), Err(SheetsError::Config(_))));
    }

    #[test]
    fn rejects_unusable_base_url() {
        let config = SheetsConfig::new("sheet-1".to_string(), "token".to_string())
            .with_base_url("mailto:nobody@example.com");
        assert!(matches!(SheetsHttpClient::new(&config), Err(SheetsError::Config(_))));
    }

    #[test]
    fn values_url_keeps_a1_punctuation() {
        let url = client("https://sheets.googleapis.com").values_url("'Orders'!A2:C", None);
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/'Orders'!A2:C"
        );
    }

    #[test]
    fn values_url_encodes_non_ascii_titles() {
        let url = client("https://sheets.googleapis.com").values_url("'설정'!B1", None);
        assert!(url.path().ends_with("/values/'%EC%84%A4%EC%A0%95'!B1"));
    }

    #[test]
    fn values_url_appends_method_suffix() {
        let url = client("http://127.0.0.1:8080/").values_url("'Orders'!A:C", Some("append"));
        assert_eq!(url.path(), "/v4/spreadsheets/sheet-1/values/'Orders'!A:C:append");
    }

    #[test]
    fn spreadsheet_url_with_method() {
        let url = client("http://127.0.0.1:8080").spreadsheet_url(Some("batchUpdate"));
        assert_eq!(url.path(), "/v4/spreadsheets/sheet-1:batchUpdate");
    }

    #[test]
    fn debug_omits_token() {
        let debug = format!("{:?}", client("https://sheets.googleapis.com"));
        assert!(!debug.contains("token"));
    }
}
