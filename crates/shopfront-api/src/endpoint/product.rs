//! # Product Endpoint
//!
//! Catalog CRUD against `/products`.

use shopfront_core::{Product, ProductDraft};
use tracing::debug;

use crate::client::HttpClient;
use crate::error::RemoteResult;

const PRODUCTS: &str = "products";

/// Borrowed view of the client scoped to `/products`.
#[derive(Debug, Clone, Copy)]
pub struct ProductEndpoint<'a> {
    http: &'a HttpClient,
}

impl<'a> ProductEndpoint<'a> {
    pub fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Every product. A `null` body is treated as an empty catalog.
    pub async fn list(&self) -> RemoteResult<Vec<Product>> {
        let products: Option<Vec<Product>> = self.http.get(&[PRODUCTS]).await?;
        let products = products.unwrap_or_default();
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Creates a product; the backend assigns the id.
    pub async fn create(&self, draft: &ProductDraft) -> RemoteResult<Product> {
        self.http.post(&[PRODUCTS], draft).await
    }

    /// Replaces product `id`. The body always carries the same `id`.
    pub async fn update(&self, id: &str, draft: &ProductDraft) -> RemoteResult<Product> {
        let body = draft.clone().for_update(id);
        self.http.put(&[PRODUCTS, id], &body).await
    }

    pub async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.http.delete(&[PRODUCTS, id]).await
    }
}
