//! `uf_quote` is a Rust library for quoting real estate sales in Chile.
//!
//! Prices are expressed in UF (Unidad de Fomento) and converted to CLP with a reference rate.
//! The library provides:
//! - **Pricing**: the effective sale price of a property, its published price minus its discount.
//! - **Quotes**: an ordered selection of properties with quantities, and its totals before and
//!   after discounts.
//! - **Mortgage simulation**: the fixed monthly payment of the financed share of a quote using
//!   the Price table (French amortization), with the total interest and the minimum income
//!   required by a 25% debt-to-income policy.
//! - **Export**: a paginated quote document with every amount already formatted.
//!
//! ## Usage
//!
//! Add `uf_quote` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! uf_quote = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then load a catalog, add properties to a [`QuoteSession`] and read the derived values:
//!
//! ```rust
//! use uf_quote::{Catalog, PercentageKind, QuoteSession};
//! use uf_quote::format::{format_fixed, format_uf};
//!
//! fn main() {
//!     let json = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json"))
//!         .expect("bundled catalog");
//!     let catalog = Catalog::from_json(&json).expect("valid catalog");
//!
//!     let mut session = QuoteSession::default();
//!     session.add_property(&catalog.properties()[0]);
//!     session.adjust_percentage(PercentageKind::Loan, "90");
//!
//!     let totals = session.totals();
//!     let simulation = session.simulation();
//!     println!("Total:           UF {}", format_uf(totals.net_total));
//!     println!("Monthly payment: UF {}", format_fixed(simulation.monthly_payment, 2));
//!     println!("Minimum income:  UF {}", format_fixed(simulation.minimum_income, 1));
//! }
//! ```

pub mod args;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod export;
pub mod financing;
pub mod format;
pub mod ledger;
pub mod pricing;
pub mod property;
pub mod session;
pub mod simulation;
pub mod totals;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, ConfigError};
pub use export::QuoteDocument;
pub use financing::{FinancingParams, PercentageKind};
pub use ledger::{Ledger, LedgerError, SelectionEntry};
pub use pricing::effective_price;
pub use property::{Category, PriceRecord, Property};
pub use session::{ClientContact, QuoteSession, View};
pub use simulation::{SimulationResult, simulate};
pub use totals::{Totals, compute_totals};
