//! # Domain Types
//!
//! Core domain types used throughout Bodega POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │     User      │   │    Product    │   │     Sale      │         │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │         │
//! │  │  id           │   │  id           │   │  id           │         │
//! │  │  username     │   │  barcode      │   │  transaction_ │         │
//! │  │  role         │   │  price_cents  │   │      id       │         │
//! │  │  (hash never  │   │  stock        │   │  total_amount │         │
//! │  │   serialized) │   └───────┬───────┘   └───────┬───────┘         │
//! │  └───────────────┘           │                   │                 │
//! │                              └───► SaleItem ◄────┘                 │
//! │                                  (price snapshot)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Rows use numeric ids for relations; a committed sale additionally
//! carries `transaction_id`, the externally visible unique string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (the default display-level VAT rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role of a user: a closed two-variant set.
///
/// Checked as an enum at the authorization boundary, never by string
/// comparison inside handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including inventory management.
    Admin,
    /// Can sell and read, cannot manage inventory.
    Cashier,
}

impl Role {
    /// Parses a role string from a registration payload.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "cashier" => Some(Role::Cashier),
            _ => None,
        }
    }

    /// Lowercase wire/storage name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Cashier
    }
}

// =============================================================================
// User
// =============================================================================

/// A login identity (admin or cashier).
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 hash of the password. Never leaves the server.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Display name shown to cashier and in reports.
    pub name: String,

    /// Barcode (EAN-13, UPC-A, etc.). Unique when present.
    pub barcode: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never negative after a committed sale.
    pub stock: i64,

    pub category: Option<String>,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the requested quantity can be sold from stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction. Immutable once written.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// Externally visible unique identifier, distinct from the row id.
    pub transaction_id: String,

    /// Cashier who rang up the sale.
    pub cashier_id: Option<i64>,

    /// Sum of all line totals, written once after pricing every line.
    pub total_amount_cents: i64,

    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern: the unit price is frozen at sale time,
/// so later product price edits never alter historical totals.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit price.
    pub line_total_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of a submitted cart: what the client sends to create a sale.
///
/// The cart itself lives in the browser; the server only ever sees this
/// transient list at checkout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Report Grouping
// =============================================================================

/// Bucket size for the grouped sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportGrouping {
    Day,
    Week,
    Month,
}

impl ReportGrouping {
    /// Parses the `groupBy` query parameter.
    pub fn parse(value: &str) -> Option<ReportGrouping> {
        match value {
            "day" => Some(ReportGrouping::Day),
            "week" => Some(ReportGrouping::Week),
            "month" => Some(ReportGrouping::Month),
            _ => None,
        }
    }
}

impl Default for ReportGrouping {
    fn default() -> Self {
        ReportGrouping::Day
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
