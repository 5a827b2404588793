//! Sale price derivation.

use crate::property::{PriceRecord, Property};
use rust_decimal::Decimal;

/// Returns the record that is considered active for pricing.
///
/// This is always the first record of the list. The records carry a validity window
/// (`valid_from`/`valid_to`) but no date filtering is applied, so later records never affect a
/// computed price.
pub fn active_record(records: &[PriceRecord]) -> Option<&PriceRecord> {
    records.first()
}

/// The published sale price of a property, or zero when it has none.
pub fn external_price(property: &Property) -> Decimal {
    active_record(&property.external_prices)
        .map(|record| record.value)
        .unwrap_or_default()
}

/// The discount granted on a property, or zero when it has none.
pub fn discount(property: &Property) -> Decimal {
    active_record(&property.discounts)
        .map(|record| record.value)
        .unwrap_or_default()
}

/// Calculates the effective sale price of a property: external price minus discount.
///
/// A discount larger than the price yields a negative value. It is returned as is.
/// Amounts beyond the `Decimal` range saturate.
pub fn effective_price(property: &Property) -> Decimal {
    external_price(property).saturating_sub(discount(property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::fixtures::{property, with_extra_records};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(4500), dec!(250), dec!(4250))]
    #[case(dec!(4500), dec!(0), dec!(4500))]
    #[case(dec!(1000.5), dec!(0.5), dec!(1000))]
    #[case(dec!(100), dec!(150), dec!(-50))]
    fn test_effective_price(#[case] price: Decimal, #[case] off: Decimal, #[case] expected: Decimal) {
        let p = property("Av. Italia 900", "1", price, off);
        assert_eq!(effective_price(&p), expected);
    }

    #[test]
    fn test_missing_records_count_as_zero() {
        let mut p = property("Av. Italia 900", "1", dec!(4500), dec!(200));
        p.external_prices.clear();
        assert_eq!(external_price(&p), dec!(0));
        assert_eq!(effective_price(&p), dec!(-200));

        p.discounts.clear();
        assert_eq!(effective_price(&p), dec!(0));
    }

    #[test]
    fn test_only_first_record_is_used() {
        let p = with_extra_records(
            property("Av. Italia 900", "1", dec!(4500), dec!(200)),
            dec!(9999),
            dec!(1),
        );
        assert_eq!(p.external_prices.len(), 2);
        assert_eq!(external_price(&p), dec!(4500));
        assert_eq!(discount(&p), dec!(200));
        assert_eq!(active_record(&p.external_prices).unwrap().value, dec!(4500));
    }

    #[test]
    fn test_active_record_of_empty_list() {
        assert!(active_record(&[]).is_none());
    }
}
