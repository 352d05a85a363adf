//! Property-based tests for the categorizer module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tallybook_shared::types::{AccountRef, TransactionId};

use super::category::{Category, CategoryGroup, Polarity};
use super::service::Categorizer;
use super::types::{CategoryTotals, Transaction};

const DESCRIPTIONS: &[&str] = &[
    "Stripe Transfer ST-1",
    "PAYPAL TRANSFER",
    "Zelle to Owner",
    "Zelle from Client",
    "Transfer from personal savings",
    "Stripe Capital Repayment",
    "Adobe Creative Cloud",
    "Starbucks Coffee",
    "Shell Gas Station",
    "Office Depot",
    "Rent Payment",
    "Interest Earned",
    "Amazon Refund",
    "Customer Chargeback",
    "Upwork Freelancer",
    "Mystery Vendor",
    "",
];

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    // Cents in [-1_000_000.00, 1_000_000.00]
    (-100_000_000i64..=100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        prop::sample::select(DESCRIPTIONS),
        amount_strategy(),
        1u32..=365,
    )
        .prop_map(|(description, amount, ordinal)| Transaction {
            id: TransactionId::new(format!("txn-{ordinal}")),
            date: NaiveDate::from_yo_opt(2024, ordinal).unwrap(),
            amount,
            description: description.to_string(),
            account_id: AccountRef::new("checking"),
            merchant_name: None,
        })
}

fn categorizer() -> Categorizer {
    Categorizer::new().unwrap()
}

proptest! {
    /// Every transaction receives a category that respects its direction.
    ///
    /// Revenue categories only go to income, expense categories only to
    /// spending; special categories accept either.
    #[test]
    fn test_category_respects_polarity(txn in transaction_strategy()) {
        let category = categorizer().categorize(&txn);
        let admitted = match category.group() {
            CategoryGroup::Special => true,
            _ => category.polarity().admits(txn.is_income()),
        };
        prop_assert!(admitted, "{} assigned to amount {}", category, txn.amount);
    }

    /// Descriptions no rule can match fall back by direction alone.
    #[test]
    fn test_fallback_is_deterministic(
        digits in "[0-9]{0,12}",
        amount in amount_strategy(),
    ) {
        let txn = Transaction {
            id: TransactionId::new("t"),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            amount,
            description: digits,
            account_id: AccountRef::new("checking"),
            merchant_name: None,
        };
        let expected = if amount < Decimal::ZERO {
            Category::OtherIncome
        } else {
            Category::AwaitingExpense
        };
        prop_assert_eq!(categorizer().categorize(&txn), expected);
    }

    /// Categorizing twice yields the same result.
    #[test]
    fn test_categorize_is_idempotent(txns in prop::collection::vec(transaction_strategy(), 0..40)) {
        let categorizer = categorizer();
        prop_assert_eq!(categorizer.categorize_all(&txns), categorizer.categorize_all(&txns));
    }

    /// Output records preserve order and carry absolute amounts.
    #[test]
    fn test_records_mirror_input(txns in prop::collection::vec(transaction_strategy(), 0..40)) {
        let categorized = categorizer().categorize_all(&txns);
        prop_assert_eq!(categorized.len(), txns.len());
        for (record, txn) in categorized.iter().zip(&txns) {
            prop_assert_eq!(&record.transaction_id, &txn.id);
            prop_assert_eq!(record.amount, txn.amount.abs());
            prop_assert_eq!(record.original_amount, txn.amount);
            prop_assert_eq!(record.is_income, txn.amount < Decimal::ZERO);
            prop_assert!(record.amount >= Decimal::ZERO);
        }
    }

    /// Category totals always add up to the sum of absolute amounts.
    #[test]
    fn test_totals_sum_to_batch(txns in prop::collection::vec(transaction_strategy(), 0..60)) {
        let categorized = categorizer().categorize_all(&txns);
        let totals: CategoryTotals = Categorizer::category_totals(&categorized);
        let expected: Decimal = txns.iter().map(|t| t.amount.abs()).sum();
        prop_assert_eq!(totals.grand_total(), expected);
        for (_, amount) in totals.iter() {
            prop_assert!(*amount >= Decimal::ZERO);
        }
    }

    /// Parallel categorization matches the sequential result exactly.
    #[test]
    fn test_parallel_equals_sequential(txns in prop::collection::vec(transaction_strategy(), 0..80)) {
        let categorizer = categorizer();
        prop_assert_eq!(
            categorizer.categorize_all_parallel(&txns),
            categorizer.categorize_all(&txns)
        );
    }

    /// Special descriptions win regardless of direction.
    #[test]
    fn test_special_rules_ignore_polarity(amount in amount_strategy()) {
        let txn = Transaction {
            id: TransactionId::new("t"),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount,
            description: "Zelle to Owner".to_string(),
            account_id: AccountRef::new("checking"),
            merchant_name: None,
        };
        let category = categorizer().categorize(&txn);
        prop_assert_eq!(category.polarity(), Polarity::Any);
        prop_assert_eq!(category, Category::MemberDrawing);
    }
}
