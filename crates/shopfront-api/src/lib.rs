//! # shopfront-api: REST Backend Client for Shopfront POS
//!
//! All products and bills live in an external REST backend. This crate is
//! the only place that talks to it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shopfront Data Flow                               │
//! │                                                                         │
//! │  Controller command (save_product, finalize_bill, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  shopfront-api (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Backend     │    │   Endpoints   │    │  HttpClient  │    │    │
//! │  │   │   (trait)     │───►│ ProductEndpt  │───►│   reqwest    │    │    │
//! │  │   │ RestBackend   │    │ BillEndpoint  │    │  JSON bodies │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  REST backend  GET/POST /products  PUT/DELETE /products/:id             │
//! │                GET/POST /bills                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - HTTP transport and error message extraction
//! - [`endpoint`] - Per-resource accessors (products, bills)
//! - [`backend`] - `Backend` trait and its REST implementation
//! - [`error`] - Remote error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod client;
pub mod endpoint;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{Backend, RestBackend};
pub use client::{ClientConfig, HttpClient, DEFAULT_BASE_URL};
pub use error::{RemoteError, RemoteResult};
