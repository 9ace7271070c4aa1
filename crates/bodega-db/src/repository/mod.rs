//! # Repository Module
//!
//! Database repository implementations for Bodega POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                               │
//! │                                                                     │
//! │  REST handler                                                       │
//! │       │                                                             │
//! │       │  db.sales().checkout(cashier_id, &lines, "cash")            │
//! │       ▼                                                             │
//! │  SaleRepository                                                     │
//! │  ├── checkout(&self, cashier_id, lines, payment_method)             │
//! │  ├── list(&self, filter)                                            │
//! │  └── get_with_items(&self, id)                                      │
//! │       │                                                             │
//! │       │  SQL                                                        │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place per entity                          │
//! │  • Handlers stay thin                                               │
//! │  • Repositories are cheap clones over the shared pool               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - User creation and lookup
//! - [`product::ProductRepository`] - Product CRUD
//! - [`sale::SaleRepository`] - Checkout transaction and sale history
//! - [`report::ReportRepository`] - Read-only dashboard aggregations

pub mod product;
pub mod report;
pub mod sale;
pub mod user;
