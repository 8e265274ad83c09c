//! # shopfront-core: Pure Business Logic for Shopfront POS
//!
//! Everything the shop counter computes lives here, as pure functions over
//! in-memory values. The REST client, label renderer and desktop controller
//! all build on these types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Terminal shell / Controller                     │    │
//! │  │   products ──► bill add ──► bill finalize ──► invoice           │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │              ★ shopfront-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │    │
//! │  │   │  types   │ │  money   │ │   bill   │ │ catalog  │           │    │
//! │  │   │ Product  │ │  Money   │ │ Builder  │ │  lookup  │           │    │
//! │  │   │  Bill    │ │          │ │ Totals   │ │          │           │    │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │    │
//! │  │   ┌──────────┐ ┌──────────┐                                     │    │
//! │  │   │validation│ │ invoice  │   NO I/O • NO NETWORK               │    │
//! │  │   └──────────┘ └──────────┘                                     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │           shopfront-api (REST backend client)                   │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Product, BillItem, Bill, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic
//! - [`bill`] - The in-progress bill and its totals
//! - [`catalog`] - In-memory product mirror and identifier lookup
//! - [`invoice`] - Printable invoice layout for a persisted bill
//! - [`validation`] - Form parsing and business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{BillBuilder, Catalog, Money, Product};
//!
//! let catalog = Catalog::from_products(vec![Product {
//!     id: "P001".into(),
//!     name: "Linen Shirt".into(),
//!     category: "Shirts".into(),
//!     price: Money::from_major_minor(100, 0),
//!     colors: String::new(),
//!     sizes: String::new(),
//! }]);
//!
//! let mut bill = BillBuilder::new();
//! bill.add_item(&catalog, "P001", 2).unwrap();
//! bill.set_discount(Money::from_major_minor(30, 0)).unwrap();
//!
//! let totals = bill.totals();
//! assert_eq!(totals.sub_total.cents(), 20000);
//! assert_eq!(totals.grand_total.cents(), 17000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod catalog;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{BillBuilder, BillTotals};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::Invoice;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shop name printed on labels and invoices when nothing else is configured.
pub const DEFAULT_SHOP_NAME: &str = "Fashion World";

/// Categories offered by the product form.
///
/// Anything else is entered through [`OTHER_CATEGORY`] with a custom name.
pub const PREDEFINED_CATEGORIES: &[&str] = &[
    "Shirts",
    "T-Shirts",
    "Jeans",
    "Trousers",
    "Sarees",
    "Kurtis",
    "Dresses",
    "Suits",
    "Lehengas",
    "Jackets",
    "Sweaters",
    "Shorts",
    "Skirts",
    "Ethnic Wear",
    "Western Wear",
    "Sportswear",
    "Sleepwear",
    "Lingerie",
    "Accessories",
    "Footwear",
    "Kids Wear",
];

/// Sentinel category choice meaning "use the custom category name".
pub const OTHER_CATEGORY: &str = "Other...";
