//! # Bill Endpoint
//!
//! Bills are append-only: list and create, nothing else.

use shopfront_core::{Bill, NewBill};
use tracing::debug;

use crate::client::HttpClient;
use crate::error::RemoteResult;

const BILLS: &str = "bills";

/// Borrowed view of the client scoped to `/bills`.
#[derive(Debug, Clone, Copy)]
pub struct BillEndpoint<'a> {
    http: &'a HttpClient,
}

impl<'a> BillEndpoint<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Bill history in backend order. A `null` body is treated as empty.
    pub async fn list(&self) -> RemoteResult<Vec<Bill>> {
        let bills: Option<Vec<Bill>> = self.http.get(&[BILLS]).await?;
        let bills = bills.unwrap_or_default();
        debug!(count = bills.len(), "Fetched bills");
        Ok(bills)
    }

    /// Persists a finalized bill and returns it with id and timestamp.
    pub async fn create(&self, bill: &NewBill) -> RemoteResult<Bill> {
        self.http.post(&[BILLS], bill).await
    }
}
