//! # Endpoint Module
//!
//! One accessor per backend resource.
//!
//! ## Endpoint Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Endpoint Pattern                                     │
//! │                                                                         │
//! │  Controller                                                             │
//! │       │                                                                 │
//! │       │  backend.products().create(&draft)                              │
//! │       ▼                                                                 │
//! │  ProductEndpoint                                                        │
//! │  ├── list()            GET    /products                                 │
//! │  ├── create(draft)     POST   /products                                 │
//! │  ├── update(id, draft) PUT    /products/:id                             │
//! │  └── delete(id)        DELETE /products/:id                             │
//! │                                                                         │
//! │  BillEndpoint                                                           │
//! │  ├── list()            GET    /bills                                    │
//! │  └── create(bill)      POST   /bills                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HttpClient (JSON over HTTP)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod bill;
pub mod product;
