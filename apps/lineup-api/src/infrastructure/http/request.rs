//! HTTP request types and body/query parsing.

use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Secret check request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSecretRequest {
    /// Candidate secret. Any JSON type is accepted; only strings can match.
    #[serde(default)]
    pub password: Option<Value>,
}

/// A candidate secret as read from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// String value. Absent and `null` read as `""`.
    Text(&'a str),
    /// Number, boolean, array or object. Never equal to the stored text.
    NotText,
}

impl CheckSecretRequest {
    /// Classify the supplied password.
    #[must_use]
    pub fn candidate(&self) -> Candidate<'_> {
        match &self.password {
            None | Some(Value::Null) => Candidate::Text(""),
            Some(Value::String(s)) => Candidate::Text(s),
            Some(_) => Candidate::NotText,
        }
    }
}

/// Secret rotation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecretRequest {
    /// Current secret.
    #[serde(default)]
    pub old_password: Option<String>,
    /// Replacement secret.
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Order save request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderRequest {
    /// Order name.
    #[serde(default)]
    pub order_name: Option<String>,
    /// Opaque payload. JSON `null` reads as absent.
    #[serde(default)]
    pub payload: Option<Value>,
}

/// `?name=` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NameQuery {
    /// Order name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Decode a JSON body. An empty body decodes as the type's default.
pub fn parse_json<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

/// Decode a JSON body as an untyped value. An empty body reads as `null`.
pub fn parse_json_value(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

/// The `name` query parameter, or `""` if absent.
pub fn name_param(uri: &Uri) -> Result<String, ApiError> {
    let Query(query) = Query::<NameQuery>::try_from_uri(uri)
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(query.name.unwrap_or_default())
}
