//! Catalog property records.
//!
//! A [`Property`] is loaded once from the catalog and never mutated. Its identity for quoting
//! purposes is the pair (address, unit number), see [`PropertyKey`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog partition a property is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Economy,
    Exclusive,
}

impl Category {
    /// Categories in the order they are displayed.
    pub const fn ordered() -> [Self; 2] {
        [Self::Economy, Self::Exclusive]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Value Opportunities",
            Self::Exclusive => "Elite Properties",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    House,
    Apartment,
    Land,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Available,
    Reserved,
    Sold,
}

/// One entry of a property's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: u32,
    pub status: SaleStatus,
    pub date: NaiveDate,
}

/// A value with a currency and a validity window.
///
/// Used for both external sale prices and discounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// The amount, expressed in `currency` (UF in practice).
    pub value: Decimal,
    pub currency: String,
    /// First day the record applies.
    pub valid_from: NaiveDate,
    /// Last day the record applies.
    pub valid_to: NaiveDate,
}

/// A property as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub company_id: String,
    pub country: String,
    pub region: String,
    pub commune: String,
    pub city: String,
    pub kind: PropertyKind,
    pub model: String,
    pub name: String,
    pub address: String,
    pub photo: String,
    /// Unit number within the address. Together with `address` it identifies the property.
    pub unit_number: String,
    #[serde(default)]
    pub status: Vec<StatusRecord>,
    pub orientation: Option<String>,
    pub floor: Option<i32>,
    /// Price used internally by the sales team. Informational only.
    pub internal_sale_price: Decimal,
    /// Published sale prices. Only the first record is used for pricing.
    #[serde(default)]
    pub external_prices: Vec<PriceRecord>,
    pub usable_surface: Decimal,
    pub total_surface: Decimal,
    pub interior_surface: Decimal,
    pub terrace: Decimal,
    pub loggia: Decimal,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub authorized_discount: Decimal,
    /// Discounts on the external price. Only the first record is used for pricing.
    #[serde(default)]
    pub discounts: Vec<PriceRecord>,
    pub category: Category,
    #[serde(default)]
    pub featured: bool,
}

/// The (address, unit number) pair used to merge repeated selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey<'a> {
    pub address: &'a str,
    pub unit_number: &'a str,
}

impl Property {
    pub fn key(&self) -> PropertyKey<'_> {
        PropertyKey {
            address: &self.address,
            unit_number: &self.unit_number,
        }
    }

    /// Most recent status, if the history is not empty.
    pub fn current_status(&self) -> Option<SaleStatus> {
        self.status
            .iter()
            .max_by_key(|record| record.date)
            .map(|record| record.status)
    }
}
