//! Categorizer data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{AccountRef, TransactionId, money};

use super::category::{Category, CategoryGroup};

/// A normalized upstream transaction.
///
/// Sign convention: negative `amount` is money received (income), positive
/// is money spent (expense).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique, stable transaction ID.
    pub id: TransactionId,
    /// Posting date.
    pub date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Merchant or memo text.
    #[serde(default)]
    pub description: String,
    /// External account reference.
    pub account_id: AccountRef,
    /// Merchant name, when the source provides one.
    #[serde(default)]
    pub merchant_name: Option<String>,
}

impl Transaction {
    /// Returns true if the transaction is money received.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// A transaction after categorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    /// Upstream transaction ID.
    pub transaction_id: TransactionId,
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Merchant or memo text.
    #[serde(default)]
    pub description: String,
    /// Absolute amount.
    pub amount: Decimal,
    /// Assigned category.
    pub category: Category,
    /// External account reference.
    pub account_id: AccountRef,
    /// Merchant name, empty when absent.
    #[serde(default)]
    pub merchant_name: String,
    /// True if the original amount was negative.
    pub is_income: bool,
    /// Signed upstream amount, kept for audit.
    pub original_amount: Decimal,
}

impl CategorizedTransaction {
    /// Builds the output record for a transaction and its category.
    #[must_use]
    pub fn new(transaction: &Transaction, category: Category) -> Self {
        Self {
            transaction_id: transaction.id.clone(),
            date: transaction.date.format("%Y-%m-%d").to_string(),
            description: transaction.description.clone(),
            amount: transaction.amount.abs(),
            category,
            account_id: transaction.account_id.clone(),
            merchant_name: transaction.merchant_name.clone().unwrap_or_default(),
            is_income: transaction.is_income(),
            original_amount: transaction.amount,
        }
    }
}

/// Sum of absolute amounts per category.
///
/// Categories without transactions are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<Category, Decimal>);

impl CategoryTotals {
    /// Aggregates a categorized batch.
    #[must_use]
    pub fn from_transactions(transactions: &[CategorizedTransaction]) -> Self {
        let mut totals = Self::default();
        for txn in transactions {
            totals.add(txn.category.clone(), txn.amount);
        }
        totals
    }

    /// Adds an amount to a category's running sum.
    pub fn add(&mut self, category: Category, amount: Decimal) {
        *self.0.entry(category).or_insert(Decimal::ZERO) += amount.abs();
    }

    /// Total for a category, zero if absent.
    #[must_use]
    pub fn get(&self, category: &Category) -> Decimal {
        self.0.get(category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the category received at least one transaction.
    #[must_use]
    pub fn contains(&self, category: &Category) -> bool {
        self.0.contains_key(category)
    }

    /// Sum over every category.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        money::sum(self.0.values())
    }

    /// Sum over the categories of one group.
    #[must_use]
    pub fn group_total(&self, group: CategoryGroup) -> Decimal {
        self.0
            .iter()
            .filter(|(category, _)| category.group() == group)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Number of categories present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no category is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates categories in chart order, custom categories last.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &Decimal)> {
        self.0.iter()
    }
}

impl FromIterator<(Category, Decimal)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (Category, Decimal)>>(iter: I) -> Self {
        let mut totals = Self::default();
        for (category, amount) in iter {
            totals.add(category, amount);
        }
        totals
    }
}

/// Overview of a categorized batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationSummary {
    /// Number of transactions processed.
    pub transaction_count: usize,
    /// Number of distinct categories used.
    pub categories_used: usize,
    /// Number of transactions awaiting manual review.
    pub needs_review: usize,
    /// Sales, interest and other income (contra-revenue excluded).
    pub total_revenue: Decimal,
    /// Cost of sales, operating expense and awaiting-review total.
    pub total_expenses: Decimal,
    /// Revenue minus expenses.
    pub net: Decimal,
}
