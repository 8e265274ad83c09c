//! # Product Commands
//!
//! Catalog loading and product management.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_product(form)                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  form.validate() ── ValidationError ──► form kept, nothing sent         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  editing_id? ── None ──► POST /products                                 │
//! │        │                                                                │
//! │      Some(id) ─────────► PUT /products/:id  (id also in body)           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  catalog.upsert(response), form reset                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_api::Backend;
use shopfront_core::validation::ProductForm;
use shopfront_core::{Catalog, CoreError, Product};
use tracing::{debug, info};

use super::Controller;
use crate::error::AppError;
use crate::state::View;

impl<B: Backend> Controller<B> {
    /// Fetches products and bills concurrently.
    ///
    /// If either request fails both lists are emptied and the banner is
    /// set; the app keeps running with nothing loaded.
    pub async fn load_initial_data(&mut self) -> Result<(), AppError> {
        self.begin_remote();
        info!("Loading products and bills from backend");

        let (products, bills) = tokio::join!(
            self.backend.list_products(),
            self.backend.list_bills()
        );

        match (products, bills) {
            (Ok(products), Ok(bills)) => {
                info!(
                    products = products.len(),
                    bills = bills.len(),
                    "Initial data loaded"
                );
                self.state.catalog = Catalog::from_products(products);
                self.state.history = bills;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                self.state.catalog.clear();
                self.state.history.clear();
                Err(self.remote_failed("load initial data", e))
            }
        }
    }

    /// Validates the form, then creates or updates the product.
    ///
    /// Returns the product as the backend stored it.
    pub async fn save_product(&mut self, form: ProductForm) -> Result<Product, AppError> {
        self.state.product_editor.form = form;
        let draft = self.state.product_editor.form.validate()?;
        let editing_id = self.state.product_editor.editing_id.clone();
        debug!(editing = ?editing_id, name = %draft.name, "save_product command");

        self.begin_remote();
        let result = match &editing_id {
            Some(id) => self.backend.update_product(id, &draft).await,
            None => self.backend.create_product(&draft).await,
        };

        match result {
            Ok(product) => {
                info!(id = %product.id, updated = editing_id.is_some(), "Product saved");
                self.state.catalog.upsert(product.clone());
                self.state.product_editor.reset();
                Ok(product)
            }
            Err(e) => Err(self.remote_failed("save product", e)),
        }
    }

    /// Loads a product into the form and switches to the products view.
    pub fn edit_product(&mut self, id: &str) -> Result<&ProductForm, AppError> {
        debug!(id, "edit_product command");
        let product = self
            .state
            .catalog
            .get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        self.state.product_editor.form = ProductForm::from_product(product);
        self.state.product_editor.editing_id = Some(product.id.clone());
        self.state.view = View::Products;
        Ok(&self.state.product_editor.form)
    }

    /// Abandons the edit and clears the form.
    pub fn cancel_edit(&mut self) {
        self.state.product_editor.reset();
    }

    /// Deletes a product remotely, then locally.
    pub async fn delete_product(&mut self, id: &str) -> Result<(), AppError> {
        debug!(id, "delete_product command");
        self.begin_remote();

        if let Err(e) = self.backend.delete_product(id).await {
            return Err(self.remote_failed("delete product", e));
        }

        self.state.catalog.remove(id);
        if self.state.product_editor.editing_id.as_deref() == Some(id) {
            self.state.product_editor.reset();
        }
        info!(id, "Product deleted");
        Ok(())
    }
}
