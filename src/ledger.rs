//! The ordered selection of properties being quoted.

use crate::pricing::effective_price;
use crate::property::Property;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no selection at position {index}, the quote has {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A selected property and how many units of it are quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub property: Property,
    /// Always at least 1.
    pub quantity: u32,
}

impl SelectionEntry {
    /// Effective unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        effective_price(&self.property).saturating_mul(Decimal::from(self.quantity))
    }
}

/// Selected properties in insertion order.
///
/// The ledger is the only mutator of its entries. Positions are user visible and are used to
/// address entries in [`Ledger::remove`] and [`Ledger::set_quantity_delta`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<SelectionEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `property`.
    ///
    /// If an entry with the same address and unit number exists its quantity is incremented,
    /// otherwise a new entry with quantity 1 is appended.
    pub fn add(&mut self, property: &Property) {
        let key = property.key();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.property.key() == key) {
            entry.quantity = entry.quantity.saturating_add(1);
            debug!(
                address = %property.address,
                unit = %property.unit_number,
                quantity = entry.quantity,
                "Merged selection"
            );
            return;
        }

        self.entries.push(SelectionEntry {
            property: property.clone(),
            quantity: 1,
        });
        debug!(
            address = %property.address,
            unit = %property.unit_number,
            position = self.entries.len() - 1,
            "Appended selection"
        );
    }

    /// Removes and returns the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] and leaves the ledger untouched if there is no
    /// entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<SelectionEntry, LedgerError> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        debug!(position = index, address = %removed.property.address, "Removed selection");
        Ok(removed)
    }

    /// Changes the quantity at `index` by `delta`, never going below 1. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IndexOutOfRange`] if there is no entry at `index`.
    pub fn set_quantity_delta(&mut self, index: usize, delta: i64) -> Result<u32, LedgerError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        let wanted = i64::from(entry.quantity).saturating_add(delta);
        entry.quantity = wanted.clamp(1, i64::from(u32::MAX)) as u32;
        debug!(position = index, delta, quantity = entry.quantity, "Adjusted quantity");
        Ok(entry.quantity)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SelectionEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index < self.entries.len() {
            return Ok(());
        }
        let err = LedgerError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        };
        warn!("{err}");
        Err(err)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::fixtures::property;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn three_units() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(&property("Av. Apoquindo 3000", "101", dec!(5000), dec!(0)));
        ledger.add(&property("Av. Apoquindo 3000", "102", dec!(5100), dec!(100)));
        ledger.add(&property("Merced 22", "7", dec!(2800), dec!(50)));
        ledger
    }

    #[test]
    fn test_add_same_key_merges() {
        let mut ledger = Ledger::new();
        let p = property("Av. Apoquindo 3000", "101", dec!(5000), dec!(0));
        ledger.add(&p);
        ledger.add(&p);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].quantity, 2);
    }

    #[test]
    fn test_add_merges_on_key_not_on_price() {
        let mut ledger = Ledger::new();
        ledger.add(&property("Merced 22", "7", dec!(2800), dec!(0)));
        ledger.add(&property("Merced 22", "7", dec!(9999), dec!(10)));

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.entries()[0].quantity, 2);
        assert_eq!(ledger.entries()[0].property.external_prices[0].value, dec!(2800));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut ledger = three_units();
        ledger.add(&property("Av. Apoquindo 3000", "101", dec!(5000), dec!(0)));

        let units: Vec<&str> = ledger.iter().map(|e| e.property.unit_number.as_str()).collect();
        assert_eq!(units, vec!["101", "102", "7"]);
        assert_eq!(ledger.entries()[0].quantity, 2);
    }

    #[test]
    fn test_remove_shifts_following_entries() {
        let mut ledger = three_units();
        let removed = ledger.remove(1).unwrap();

        assert_eq!(removed.property.unit_number, "102");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[1].property.unit_number, "7");
    }

    #[test]
    fn test_remove_out_of_range_leaves_ledger_unchanged() {
        let mut ledger = three_units();
        let before = ledger.clone();

        let result = ledger.remove(3);
        assert_eq!(result, Err(LedgerError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(ledger, before);
    }

    #[rstest]
    #[case(1, 2)]
    #[case(-1, 1)]
    #[case(-100, 1)]
    #[case(i64::MIN, 1)]
    #[case(4, 5)]
    fn test_quantity_delta_from_one(#[case] delta: i64, #[case] expected: u32) {
        let mut ledger = three_units();
        assert_eq!(ledger.set_quantity_delta(2, delta), Ok(expected));
        assert_eq!(ledger.entries()[2].quantity, expected);
    }

    #[test]
    fn test_quantity_delta_floors_at_one_after_increase() {
        let mut ledger = three_units();
        ledger.set_quantity_delta(0, 5).unwrap();
        assert_eq!(ledger.set_quantity_delta(0, -3), Ok(3));
        assert_eq!(ledger.set_quantity_delta(0, -100), Ok(1));
    }

    #[test]
    fn test_add_saturates_at_max_quantity() {
        let mut ledger = three_units();
        assert_eq!(ledger.set_quantity_delta(0, i64::MAX), Ok(u32::MAX));

        let first = ledger.entries()[0].property.clone();
        ledger.add(&first);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.entries()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_quantity_delta_out_of_range() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.set_quantity_delta(0, 1),
            Err(LedgerError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_line_total() {
        let mut ledger = three_units();
        ledger.set_quantity_delta(1, 2).unwrap();
        assert_eq!(ledger.entries()[1].line_total(), dec!(15000));

        ledger.add(&property("Huerfanos 1010", "1", Decimal::MAX, dec!(0)));
        ledger.add(&property("Huerfanos 1010", "1", Decimal::MAX, dec!(0)));
        assert_eq!(ledger.entries()[3].line_total(), Decimal::MAX);
    }

    #[test]
    fn test_clear() {
        let mut ledger = three_units();
        ledger.clear();
        assert!(ledger.is_empty());
    }
}
