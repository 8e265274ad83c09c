//! # shopfront-label: Barcode Labels for Shopfront POS
//!
//! Renders a product id as a Code128 barcode and composes it with the shop
//! name and price into a PNG label ready for printing.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Label Rendering Pipeline                          │
//! │                                                                         │
//! │  product id ──► encode_code128 ──► BarcodeSurface (rects + caption)     │
//! │                     │                   │            │                  │
//! │               rejected id               │            └──► to_svg()      │
//! │                     ▼                   ▼                 (preview)     │
//! │            "Error for <id>"      bounding_box()                         │
//! │             placeholder size            │                               │
//! │                                         ▼                               │
//! │  shop name ─────────────────────► RgbaImage canvas ◄──── price          │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                              PNG bytes + data URL                       │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                     shopfront-bridge (save to disk)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`barcode`] - Code128 encoding and the vector barcode surface
//! - [`font`] - Spleen bitmap text drawing
//! - [`label`] - Label composition and PNG serialization
//! - [`error`] - Render errors

pub mod barcode;
pub mod error;
pub mod font;
pub mod label;

pub use barcode::BarcodeSurface;
pub use error::{LabelError, LabelResult};
pub use label::{
    render_label, suggested_filename, LabelImage, LabelRegions, LabelSpec, Region,
    PNG_DATA_URL_PREFIX,
};
