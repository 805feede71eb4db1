//! Property-based tests for value objects and derived totals
//!
//! Decimal inputs are generated from integer cents so every expected value
//! is exact.

use memory_business_domain::errors::DomainError;
use memory_business_domain::project::{Feature, ProfileAllocation};
use memory_business_domain::quote::{Quote, QuoteItem};
use memory_business_domain::value_objects::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn cents(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 2)
}

fn percent(value: u32) -> Decimal {
    Decimal::new(i64::from(value), 2)
}

// ============================================================================
// Money
// ============================================================================

proptest! {
    /// Same-currency addition is plain decimal addition
    #[test]
    fn test_money_add_same_currency(a in 0u32..10_000_000, b in 0u32..10_000_000) {
        let left = Money::new(cents(a), "EUR").unwrap();
        let right = Money::new(cents(b), "EUR").unwrap();
        let sum = left.add(&right).unwrap();
        prop_assert_eq!(sum.amount(), cents(a) + cents(b));
        prop_assert_eq!(sum.currency(), "EUR");
    }

    /// Mixed currencies never add
    #[test]
    fn test_money_add_mixed_currency_fails(
        a in 0u32..1_000_000,
        b in 0u32..1_000_000,
        other in "(USD|GBP|CHF|JPY)"
    ) {
        let left = Money::new(cents(a), "EUR").unwrap();
        let right = Money::new(cents(b), other).unwrap();
        let is_validation = matches!(left.add(&right), Err(DomainError::ValidationError { .. }));
        prop_assert!(is_validation);
    }

    /// Multiplication keeps the currency
    #[test]
    fn test_money_multiply_keeps_currency(a in 0u32..1_000_000, factor in 0u32..1_000) {
        let money = Money::new(cents(a), "USD").unwrap();
        let scaled = money.multiply(Decimal::from(factor)).unwrap();
        prop_assert_eq!(scaled.amount(), cents(a) * Decimal::from(factor));
        prop_assert_eq!(scaled.currency(), "USD");
    }

    /// Currency codes must be exactly three characters
    #[test]
    fn test_money_rejects_bad_currency(code in "[A-Z]{4,6}") {
        prop_assert!(Money::new(Decimal::ONE, code).is_err());
    }
}

// ============================================================================
// TaxRate
// ============================================================================

proptest! {
    /// amount * (1 + rate), exactly
    #[test]
    fn test_tax_total_is_exact(rate in 0u32..=100, amount in 0u32..100_000_000) {
        let tax = TaxRate::new(percent(rate)).unwrap();
        let total = tax.calculate_total_with_tax(cents(amount)).unwrap();
        prop_assert_eq!(total, cents(amount) * (Decimal::ONE + percent(rate)));
        prop_assert_eq!(total, cents(amount) + tax.apply_to(cents(amount)));
    }

    /// Rates above 100% are rejected
    #[test]
    fn test_tax_rate_above_one_fails(rate in 101u32..10_000) {
        prop_assert!(TaxRate::new(percent(rate)).is_err());
    }
}

// ============================================================================
// Feature allocation
// ============================================================================

fn feature_with(allocation: ProfileAllocation) -> Result<Feature, DomainError> {
    Feature::create(
        ModuleId::new(),
        "Search",
        "Full text search",
        Complexity::Complex,
        allocation,
        Decimal::ZERO,
    )
}

proptest! {
    /// Any two-way split that sums to one is accepted
    #[test]
    fn test_two_way_split_accepted(dev in 0u32..=100) {
        let allocation = ProfileAllocation::from([
            ("dev".to_string(), percent(dev)),
            ("qa".to_string(), percent(100 - dev)),
        ]);
        prop_assert!(feature_with(allocation).is_ok());
    }

    /// A single role outside [0.99, 1.01] is rejected
    #[test]
    fn test_out_of_tolerance_rejected(
        ratio in prop_oneof![1u32..=98, 102u32..=500]
    ) {
        let allocation = ProfileAllocation::from([("dev".to_string(), percent(ratio))]);
        prop_assert!(feature_with(allocation).is_err());
    }
}

// ============================================================================
// Quote totals
// ============================================================================

proptest! {
    /// total_ht is the sum of lines; total_ttc grows it by the tax rate
    #[test]
    fn test_quote_totals(
        lines in prop::collection::vec((1u32..100_000, 1u32..50), 0..8),
        rate in 0u32..=100
    ) {
        let mut quote = Quote::create(
            ClientId::new(),
            "Retainer",
            "EUR",
            Some(TaxRate::new(percent(rate)).unwrap()),
            None,
            None,
        )
        .unwrap();

        let mut expected = Decimal::ZERO;
        for (price, qty) in &lines {
            let unit = Money::new(cents(*price), "EUR").unwrap();
            let item = QuoteItem::create(quote.id(), "Line", unit, Decimal::from(*qty)).unwrap();
            quote.add_item(item).unwrap();
            expected += cents(*price) * Decimal::from(*qty);
        }

        let ht = quote.total_ht().unwrap();
        let ttc = quote.total_ttc().unwrap();
        prop_assert_eq!(ht.amount(), expected);
        prop_assert_eq!(ttc.amount(), expected * (Decimal::ONE + percent(rate)));
        prop_assert_eq!(ttc.currency(), "EUR");
    }
}

// ============================================================================
// Identifiers
// ============================================================================

proptest! {
    /// String form parses back to the same id
    #[test]
    fn test_quote_id_roundtrip(_dummy in 0u8..1) {
        let id = QuoteId::new();
        prop_assert_eq!(QuoteId::from_string(&id.to_string()).unwrap(), id);
    }
}
