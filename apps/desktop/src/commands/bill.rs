//! # Bill Commands
//!
//! Composing a bill at the counter and finalizing it.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bill Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In       │────►│ POST     │────►│ Invoice  │        │
//! │  │  bill    │     │ progress │     │ /bills   │     │ preview  │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │       ▲                │                │                               │
//! │       │           add_item         failure: builder kept,               │
//! │       │           remove_item      banner raised                        │
//! │       │           set_discount                                          │
//! │       │           set_payment_method                                    │
//! │       │                                                                 │
//! │       └──────── success: prepend to history, clear builder ─────────    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopfront_api::Backend;
use shopfront_core::validation::{coerce_discount, coerce_quantity};
use shopfront_core::{Bill, BillItem, CoreError, Invoice, Money, PaymentMethod};
use tracing::{debug, info, warn};

use super::Controller;
use crate::error::{AppError, ErrorCode};
use crate::state::View;

impl<B: Backend> Controller<B> {
    /// Adds a product by id (barcode) or name.
    ///
    /// ## Behavior
    /// - `quantity` is raw input text: non-numeric or below 1 counts as 1
    /// - Same product again: quantity increases on the existing line
    /// - After a successful add or a failed lookup the identifier input is
    ///   cleared and quantity goes back to 1
    ///
    /// Returns the line as it stands after the add.
    pub fn add_item(&mut self, identifier: &str, quantity: &str) -> Result<BillItem, AppError> {
        self.state.billing_form.identifier = identifier.to_string();
        self.state.billing_form.quantity = quantity.to_string();
        let qty = coerce_quantity(quantity);
        debug!(identifier, quantity = qty, "add_item command");

        let result = self
            .state
            .bill
            .add_item(&self.state.catalog, identifier, qty)
            .cloned();

        match result {
            Ok(item) => {
                self.state.billing_form.reset();
                Ok(item)
            }
            Err(CoreError::ProductNotFound(term)) => {
                warn!(identifier = %term, "No product matched");
                self.state.billing_form.reset();
                Err(CoreError::ProductNotFound(term).into())
            }
            // Empty identifier: leave the inputs as typed
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, product_id: &str) {
        debug!(product_id, "remove_item command");
        self.state.bill.remove_item(product_id);
    }

    /// Sets the flat discount from raw input text.
    ///
    /// Non-numeric text counts as 0. Negative amounts are rejected.
    pub fn set_discount(&mut self, amount: &str) -> Result<Money, AppError> {
        let amount = coerce_discount(amount);
        debug!(discount = %amount, "set_discount command");
        self.state.bill.set_discount(amount)?;
        Ok(amount)
    }

    /// Sets the payment method (`Cash`, `GPay`, `Card`, `Other`, any case).
    pub fn set_payment_method(&mut self, method: &str) -> Result<PaymentMethod, AppError> {
        let method: PaymentMethod = method.parse()?;
        debug!(%method, "set_payment_method command");
        self.state.bill.set_payment_method(method);
        Ok(method)
    }

    /// Submits the bill.
    ///
    /// ## Behavior
    /// - Empty bill or discount above subtotal: ValidationError, nothing sent
    /// - Success: bill goes to the front of history and into the invoice
    ///   preview; lines, discount, payment method and inputs reset
    /// - Remote failure: builder untouched so the cashier can retry
    pub async fn finalize_bill(&mut self) -> Result<Bill, AppError> {
        let payload = self.state.bill.to_new_bill()?;
        info!(
            lines = payload.items.len(),
            grand_total = %payload.grand_total,
            payment = %payload.payment_method,
            "Finalizing bill"
        );

        self.begin_remote();
        match self.backend.create_bill(&payload).await {
            Ok(bill) => {
                info!(id = %bill.id, "Bill saved");
                self.state.history.insert(0, bill.clone());
                self.state.invoice_preview = Some(bill.clone());
                self.state.view = View::InvoicePreview;
                self.state.reset_billing();
                Ok(bill)
            }
            Err(e) => Err(self.remote_failed("finalize bill", e)),
        }
    }

    /// Shows a bill from history on the invoice screen.
    pub fn preview_invoice(&mut self, bill_id: &str) -> Result<&Bill, AppError> {
        let bill = self
            .state
            .history
            .iter()
            .find(|b| b.id == bill_id)
            .cloned()
            .ok_or_else(|| {
                AppError::new(ErrorCode::Lookup, format!("Bill \"{}\" not found", bill_id))
            })?;

        self.state.view = View::InvoicePreview;
        Ok(self.state.invoice_preview.insert(bill))
    }

    /// Printable invoice for the bill in preview, if any.
    pub fn invoice_text(&self) -> Option<String> {
        self.state
            .invoice_preview
            .as_ref()
            .map(|bill| self.render_invoice(bill))
    }

    /// Formats any bill as a printable invoice.
    pub fn render_invoice(&self, bill: &Bill) -> String {
        Invoice::new(bill, &self.config.shop_name, &self.config.currency_symbol).to_string()
    }
}
