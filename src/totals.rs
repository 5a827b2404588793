//! Quote totals derived from the selection.

use crate::ledger::Ledger;
use crate::pricing::{discount, external_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregated amounts of a quote, in UF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of external prices times quantities, before any discount.
    pub gross_total: Decimal,
    /// Sum of discounts times quantities.
    pub discount_total: Decimal,
    /// Sum of effective prices times quantities.
    pub net_total: Decimal,
}

/// Reduces the ledger into its totals.
///
/// The net total is accumulated from each entry's effective price, not derived as
/// `gross_total - discount_total`. Sums beyond the `Decimal` range saturate.
pub fn compute_totals(ledger: &Ledger) -> Totals {
    ledger.iter().fold(Totals::default(), |acc, entry| {
        let quantity = Decimal::from(entry.quantity);
        Totals {
            gross_total: acc
                .gross_total
                .saturating_add(external_price(&entry.property).saturating_mul(quantity)),
            discount_total: acc
                .discount_total
                .saturating_add(discount(&entry.property).saturating_mul(quantity)),
            net_total: acc.net_total.saturating_add(entry.line_total()),
        }
    })
}
