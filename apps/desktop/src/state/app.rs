//! # Application State
//!
//! Everything the counter screen shows, owned by the
//! [`Controller`](crate::commands::Controller) and changed only through its
//! command methods.
//!
//! ## State Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState                                        │
//! │                                                                         │
//! │  view ─────────────── Products │ Billing │ History │ InvoicePreview     │
//! │                                                                         │
//! │  catalog ──────────── mirror of GET /products                           │
//! │  product_editor ───── form fields + id being edited (if any)            │
//! │                                                                         │
//! │  bill ─────────────── BillBuilder (lines, discount, payment)            │
//! │  billing_form ─────── identifier input, quantity input                  │
//! │                                                                         │
//! │  history ──────────── persisted bills, newest first                     │
//! │  invoice_preview ──── bill shown on the invoice screen                  │
//! │                                                                         │
//! │  api_error ────────── banner for the last failed remote call            │
//! │  export_status ────── soft status for the last label save               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shopfront_core::validation::ProductForm;
use shopfront_core::{Bill, BillBuilder, BillItem, BillTotals, Catalog, PaymentMethod, Product};

use crate::error::AppError;

// =============================================================================
// View
// =============================================================================

/// Which screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Products,
    Billing,
    History,
    InvoicePreview,
}

impl View {
    pub const fn as_str(&self) -> &'static str {
        match self {
            View::Products => "products",
            View::Billing => "billing",
            View::History => "history",
            View::InvoicePreview => "invoicePreview",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" => Ok(View::Products),
            "billing" => Ok(View::Billing),
            "history" => Ok(View::History),
            "invoice" | "invoicepreview" | "invoice-preview" => Ok(View::InvoicePreview),
            other => Err(AppError::usage(format!(
                "Unknown view: '{}'. Valid options: products, billing, history, invoice",
                other
            ))),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// The "add to bill" inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingForm {
    /// Product id (barcode) or name as typed/scanned
    pub identifier: String,

    /// Raw quantity text, coerced on add
    pub quantity: String,
}

impl Default for BillingForm {
    fn default() -> Self {
        BillingForm {
            identifier: String::new(),
            quantity: "1".to_string(),
        }
    }
}

impl BillingForm {
    /// Clears the identifier and puts quantity back to 1.
    pub fn reset(&mut self) {
        *self = BillingForm::default();
    }
}

/// Add/edit product form plus which product (if any) is being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEditor {
    pub form: ProductForm,
    pub editing_id: Option<String>,
}

impl ProductEditor {
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn reset(&mut self) {
        *self = ProductEditor::default();
    }
}

// =============================================================================
// App State
// =============================================================================

/// Mutable application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: View,
    pub catalog: Catalog,
    pub product_editor: ProductEditor,
    pub bill: BillBuilder,
    pub billing_form: BillingForm,
    pub history: Vec<Bill>,
    pub invoice_preview: Option<Bill>,
    pub api_error: Option<String>,
    pub export_status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the bill in progress and its inputs.
    pub fn reset_billing(&mut self) {
        self.bill.clear();
        self.billing_form.reset();
    }

    /// Owned, read-only copy for rendering.
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            view: self.view,
            products: self.catalog.products().to_vec(),
            product_form: self.product_editor.form.clone(),
            editing_id: self.product_editor.editing_id.clone(),
            bill_items: self.bill.items().to_vec(),
            totals: self.bill.totals(),
            payment_method: self.bill.payment_method(),
            billing_form: self.billing_form.clone(),
            history: self.history.clone(),
            invoice_preview: self.invoice_preview.clone(),
            api_error: self.api_error.clone(),
            export_status: self.export_status.clone(),
        }
    }
}

/// What the front end renders. Totals are recomputed on every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub view: View,
    pub products: Vec<Product>,
    pub product_form: ProductForm,
    pub editing_id: Option<String>,
    pub bill_items: Vec<BillItem>,
    pub totals: BillTotals,
    pub payment_method: PaymentMethod,
    pub billing_form: BillingForm,
    pub history: Vec<Bill>,
    pub invoice_preview: Option<Bill>,
    pub api_error: Option<String>,
    pub export_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_parsing() {
        assert_eq!("Billing".parse::<View>().unwrap(), View::Billing);
        assert_eq!(" history ".parse::<View>().unwrap(), View::History);
        assert_eq!("invoice".parse::<View>().unwrap(), View::InvoicePreview);
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn test_fresh_state_snapshot() {
        let snapshot = AppState::new().snapshot();
        assert_eq!(snapshot.view, View::Products);
        assert!(snapshot.bill_items.is_empty());
        assert_eq!(snapshot.billing_form.quantity, "1");
        assert_eq!(snapshot.payment_method, PaymentMethod::Cash);
        assert_eq!(snapshot.totals.discount_percentage, "0.00");
        assert!(snapshot.api_error.is_none());
    }

    #[test]
    fn test_snapshot_is_camel_case() {
        let json = serde_json::to_value(AppState::new().snapshot()).unwrap();
        assert_eq!(json["view"], "products");
        assert!(json.get("billItems").is_some());
        assert!(json.get("invoicePreview").is_some());
    }
}
