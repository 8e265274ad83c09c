//! # Domain Types
//!
//! Wire types shared with the REST backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │    BillItem     │   │      Bill       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (backend)   │◄──│  productId      │◄──│  items[]        │        │
//! │  │  name           │   │  productName    │   │  discountAmount │        │
//! │  │  category       │   │  quantity       │   │  paymentMethod  │        │
//! │  │  price          │   │  price (frozen) │   │  subTotal       │        │
//! │  │  colors, sizes  │   └─────────────────┘   │  grandTotal     │        │
//! │  └─────────────────┘                         │  createdAt      │        │
//! │                                              └─────────────────┘        │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  ProductDraft   │   │    NewBill      │   request bodies             │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Product and bill ids are opaque strings assigned by the backend. The
//! client never invents one. A product id doubles as its barcode payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the shop catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-assigned id, also encoded in the barcode.
    pub id: String,

    pub name: String,

    pub category: String,

    /// Selling price, always positive.
    #[ts(as = "f64")]
    pub price: Money,

    /// Free text, e.g. "Red, Blue".
    #[serde(default)]
    pub colors: String,

    /// Free text, e.g. "S, M, L".
    #[serde(default)]
    pub sizes: String,
}

/// Request body for creating or updating a product.
///
/// `id` is only present on update; the backend assigns it on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    #[ts(as = "f64")]
    pub price: Money,
    pub colors: String,
    pub sizes: String,
}

impl ProductDraft {
    /// Attaches the id of the product being edited.
    pub fn for_update(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Cash,
    GPay,
    Card,
    Other,
}

impl PaymentMethod {
    /// Every method, in the order the payment picker lists them.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::GPay,
        PaymentMethod::Card,
        PaymentMethod::Other,
    ];

    /// Wire name (also the display name).
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::GPay => "GPay",
            PaymentMethod::Card => "Card",
            PaymentMethod::Other => "Other",
        }
    }

    /// Longer label used on the picker and invoices.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card (Credit/Debit)",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "gpay" => Ok(PaymentMethod::GPay),
            "card" => Ok(PaymentMethod::Card),
            "other" => Ok(PaymentMethod::Other),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL.iter().map(|m| m.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line on a bill.
///
/// Name and price are frozen when the product is added, so later catalog
/// edits never change a bill in progress or a persisted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    #[ts(as = "f64")]
    pub price: Money,
}

impl BillItem {
    /// Snapshots a product into a new line.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        BillItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price: product.price,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A finalized bill as persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub items: Vec<BillItem>,
    #[ts(as = "f64")]
    pub discount_amount: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "f64")]
    pub sub_total: Money,
    #[ts(as = "f64")]
    pub grand_total: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Number of lines (not units).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Request body for `POST /bills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub items: Vec<BillItem>,
    #[ts(as = "f64")]
    pub discount_amount: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "f64")]
    pub sub_total: Money,
    #[ts(as = "f64")]
    pub grand_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let json = r#"{"id":"P001","name":"Kurti","category":"Kurtis","price":499.5,"colors":"Red","sizes":"M"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.cents(), 49950);

        // Missing free-text fields default to empty
        let json = r#"{"id":"P002","name":"Belt","category":"Accessories","price":99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.colors.is_empty());
        assert!(product.sizes.is_empty());
    }

    #[test]
    fn test_draft_id_only_on_update() {
        let draft = ProductDraft {
            id: None,
            name: "Kurti".into(),
            category: "Kurtis".into(),
            price: Money::from_cents(49900),
            colors: String::new(),
            sizes: String::new(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("id").is_none());

        let value = serde_json::to_value(draft.for_update("P9")).unwrap();
        assert_eq!(value["id"], "P9");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("gpay".parse::<PaymentMethod>().unwrap(), PaymentMethod::GPay);
        assert_eq!(" CARD ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(serde_json::to_string(&PaymentMethod::GPay).unwrap(), "\"GPay\"");
    }

    #[test]
    fn test_bill_wire_shape() {
        let json = r#"{
            "id": "B1",
            "items": [{"productId":"P1","productName":"Shirt","quantity":2,"price":100}],
            "discountAmount": 30,
            "paymentMethod": "Card",
            "subTotal": 200,
            "grandTotal": 170,
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.item_count(), 1);
        assert_eq!(bill.items[0].line_total().cents(), 20000);
        assert_eq!(bill.payment_method, PaymentMethod::Card);
        assert_eq!(bill.grand_total.cents(), 17000);
    }
}
