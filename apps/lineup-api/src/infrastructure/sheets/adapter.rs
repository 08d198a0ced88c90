//! Sheets range store implementing `RangeStore`.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;

use crate::application::ports::{RangeStore, RangeStoreError, Rows, SheetRange, ValueInput};
use crate::infrastructure::metrics::{UpstreamOp, record_upstream_call};

use super::api_types::BatchUpdateRequest;
use super::config::SheetsConfig;
use super::error::SheetsError;
use super::http_client::SheetsHttpClient;

/// Google Sheets backed range store.
///
/// Constructed once at startup and shared by every repository.
#[derive(Debug, Clone)]
pub struct SheetsRangeStore {
    client: SheetsHttpClient,
}

impl SheetsRangeStore {
    /// Create a new Sheets range store.
    ///
    /// # Errors
    ///
    /// Returns `SheetsError::Config` if the configuration is unusable.
    pub fn new(config: &SheetsConfig) -> Result<Self, SheetsError> {
        tracing::info!(
            spreadsheet_id = %config.spreadsheet_id,
            base_url = %config.api_base_url,
            timeout_secs = config.timeout.as_secs(),
            "Sheets range store configured"
        );
        Ok(Self {
            client: SheetsHttpClient::new(config)?,
        })
    }
}

/// Run one upstream call, recording its latency and outcome.
async fn timed<T, F>(op: UpstreamOp, call: F) -> Result<T, RangeStoreError>
where
    F: Future<Output = Result<T, SheetsError>>,
{
    let started = Instant::now();
    let result = call.await;
    record_upstream_call(op, started.elapsed(), result.is_ok());
    result.map_err(RangeStoreError::from)
}

#[async_trait]
impl RangeStore for SheetsRangeStore {
    async fn get(&self, range: &SheetRange) -> Result<Rows, RangeStoreError> {
        let a1 = range.to_string();
        tracing::debug!(range = %a1, "Reading range");

        let response = timed(UpstreamOp::Get, self.client.get_values(&a1)).await?;
        Ok(response.into_rows())
    }

    async fn update(
        &self,
        range: &SheetRange,
        rows: Rows,
        input: ValueInput,
    ) -> Result<(), RangeStoreError> {
        let a1 = range.to_string();
        tracing::debug!(range = %a1, rows = rows.len(), input = input.as_str(), "Updating range");

        timed(
            UpstreamOp::Update,
            self.client.update_values(&a1, &rows, input.as_str()),
        )
        .await
    }

    async fn append(
        &self,
        range: &SheetRange,
        rows: Rows,
        input: ValueInput,
    ) -> Result<(), RangeStoreError> {
        let a1 = range.to_string();
        tracing::debug!(range = %a1, rows = rows.len(), input = input.as_str(), "Appending rows");

        timed(
            UpstreamOp::Append,
            self.client.append_values(&a1, &rows, input.as_str()),
        )
        .await
    }

    async fn clear(&self, range: &SheetRange) -> Result<(), RangeStoreError> {
        let a1 = range.to_string();
        tracing::debug!(range = %a1, "Clearing range");

        timed(UpstreamOp::Clear, self.client.clear_values(&a1)).await
    }

    async fn sheet_id(&self, title: &str) -> Result<i64, RangeStoreError> {
        let metadata = timed(UpstreamOp::SheetId, self.client.metadata()).await?;
        metadata
            .sheet_id(title)
            .ok_or_else(|| RangeStoreError::SheetNotFound {
                title: title.to_string(),
            })
    }

    async fn delete_rows(
        &self,
        sheet_id: i64,
        start: usize,
        end: usize,
    ) -> Result<(), RangeStoreError> {
        tracing::debug!(sheet_id, start, end, "Deleting rows");

        let body = BatchUpdateRequest::delete_rows(sheet_id, start, end);
        timed(UpstreamOp::DeleteRows, self.client.batch_update(&body)).await
    }
}
