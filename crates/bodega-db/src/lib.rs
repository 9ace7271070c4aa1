//! # bodega-db: Database Layer for Bodega POS
//!
//! This crate provides database access for the Bodega POS system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Bodega POS Data Flow                         │
//! │                                                                     │
//! │  REST handler (POST /sales)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    bodega-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌──────────────┐   ┌───────────────┐   ┌──────────────┐    │  │
//! │  │   │   Database   │   │ Repositories  │   │  Migrations  │    │  │
//! │  │   │  (pool.rs)   │   │ user/product/ │   │  (embedded)  │    │  │
//! │  │   │              │◄──│ sale/report   │   │ 001_init.sql │    │  │
//! │  │   └──────────────┘   └───────────────┘   └──────────────┘    │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, product, sale, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bodega_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./bodega.db")).await?;
//! let products = db.products().list_all().await?;
//! let receipt = db.sales().checkout(cashier_id, &lines, "cash").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::{NewProduct, ProductRepository};
pub use repository::report::ReportRepository;
pub use repository::sale::{CheckoutReceipt, SaleRepository};
pub use repository::user::UserRepository;
