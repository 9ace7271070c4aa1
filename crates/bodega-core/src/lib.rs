//! # bodega-core: Pure Business Logic for Bodega POS
//!
//! This crate is the heart of Bodega POS. It contains the business rules
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Bodega POS Architecture                        │
//! │                                                                     │
//! │  Browser UI ──► REST API (apps/server) ──► bodega-db ──► SQLite     │
//! │                        │                       │                    │
//! │                        └───────┬───────────────┘                    │
//! │                                ▼                                    │
//! │                  ★ bodega-core (THIS CRATE) ★                       │
//! │                                                                     │
//! │    ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐      │
//! │    │   types   │  │   money   │  │ validation│  │   error   │      │
//! │    │  Product  │  │   Money   │  │   rules   │  │   typed   │      │
//! │    │   Sale    │  │  TaxCalc  │  │   checks  │  │  variants │      │
//! │    └───────────┘  └───────────┘  └───────────┘  └───────────┘      │
//! │                                                                     │
//! │    NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, Sale, CartLine, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bodega_core::Money` instead of
// `use bodega_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Payment method recorded when the client does not send one.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Stock level at or below which a product shows up in low-stock reports.
/// Overridable through server configuration.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Display-level VAT rate in basis points (1200 = 12%).
/// Served to the UI so it never hard-codes the rate; committed sale
/// totals remain VAT-exclusive.
pub const DEFAULT_VAT_RATE_BPS: u32 = 1200;
