//! # Label Commands
//!
//! Barcode label rendering and export.
//!
//! The controller never writes files itself: a rendered label is handed to
//! the export host through the [`ExportHandle`](shopfront_bridge::ExportHandle)
//! and the outcome comes back as a [`SaveImageResponse`].
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save_label("P001")                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  render_label ─► LabelImage { png, data_url, suggested_filename }       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  exporter.save_image(data_url, filename) ──► export host prompts        │
//! │        │                                                                │
//! │        ├── saved      → export_status "Saved barcode to …"              │
//! │        ├── canceled   → export_status "Barcode not saved: …" (warn)     │
//! │        └── host gone  → Err(EXPORT), export_status set (warn)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_api::Backend;
use shopfront_bridge::SaveImageResponse;
use shopfront_core::CoreError;
use shopfront_label::{render_label, LabelImage, LabelSpec};
use tracing::{debug, info, warn};

use super::Controller;
use crate::error::AppError;

impl<B: Backend> Controller<B> {
    /// Renders the label for a catalog product.
    ///
    /// An id the barcode encoder rejects still yields a label, with an
    /// error marker where the bars would be.
    pub fn render_label(&self, product_id: &str) -> Result<LabelImage, AppError> {
        let product = self
            .state
            .catalog
            .get(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let label = render_label(&LabelSpec {
            shop_name: &self.config.shop_name,
            product_id: &product.id,
            price: product.price,
            currency_symbol: &self.config.currency_symbol,
        })?;
        debug!(
            product_id,
            width = label.width(),
            height = label.height(),
            "render_label command"
        );
        Ok(label)
    }

    /// Sends a rendered label to the export host.
    ///
    /// A canceled or failed save is `Ok` with `success: false` and a soft
    /// status; only a missing host is an error.
    pub async fn export_label(
        &mut self,
        label: &LabelImage,
    ) -> Result<SaveImageResponse, AppError> {
        let outcome = self
            .exporter
            .save_image(label.data_url(), label.suggested_filename())
            .await;

        match outcome {
            Ok(response) if response.success => {
                let path = response
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                info!(%path, "Barcode exported");
                self.state.export_status = Some(format!("Saved barcode to {}", path));
                Ok(response)
            }
            Ok(response) => {
                let reason = response.reason.clone().unwrap_or_default();
                warn!(%reason, "Barcode export unsuccessful");
                self.state.export_status = Some(format!("Barcode not saved: {}", reason));
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Export host unavailable");
                let err = AppError::from(e);
                self.state.export_status = Some(err.message.clone());
                Err(err)
            }
        }
    }

    /// Renders and exports in one step.
    pub async fn save_label(&mut self, product_id: &str) -> Result<SaveImageResponse, AppError> {
        let label = self.render_label(product_id)?;
        self.export_label(&label).await
    }
}
