//! View switching.

use shopfront_api::Backend;
use tracing::debug;

use super::Controller;
use crate::error::AppError;
use crate::state::View;

impl<B: Backend> Controller<B> {
    /// Switches screens.
    ///
    /// Leaving the invoice preview for anything but history drops the
    /// previewed bill. The preview screen itself needs a bill to show.
    pub fn navigate(&mut self, view: View) -> Result<(), AppError> {
        if view == View::InvoicePreview && self.state.invoice_preview.is_none() {
            return Err(AppError::usage("No invoice selected. Use `invoice <billId>`."));
        }

        if self.state.view == View::InvoicePreview && view != View::History {
            self.state.invoice_preview = None;
        }

        debug!(from = %self.state.view, to = %view, "navigate command");
        self.state.view = view;
        Ok(())
    }

    /// "New Bill" from the invoice screen.
    pub fn new_bill(&mut self) {
        self.state.invoice_preview = None;
        self.state.view = View::Billing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::loaded_controller;

    #[tokio::test]
    async fn test_preview_survives_history_only() {
        let mut controller = loaded_controller().await;
        controller.add_item("P001", "1").unwrap();
        controller.finalize_bill().await.unwrap();

        controller.navigate(View::History).unwrap();
        assert!(controller.snapshot().invoice_preview.is_some());

        controller.navigate(View::InvoicePreview).unwrap();
        controller.navigate(View::Products).unwrap();
        assert!(controller.snapshot().invoice_preview.is_none());
        assert!(controller.navigate(View::InvoicePreview).is_err());
    }

    #[tokio::test]
    async fn test_new_bill() {
        let mut controller = loaded_controller().await;
        controller.add_item("P001", "1").unwrap();
        controller.finalize_bill().await.unwrap();

        controller.new_bill();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.view, View::Billing);
        assert!(snapshot.invoice_preview.is_none());
    }
}
