//! Transaction categorization service.

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::category::{Category, CategoryGroup};
use super::error::CategorizeError;
use super::rules::{MatchType, Pattern, RuleTable};
use super::types::{CategorizationSummary, CategorizedTransaction, CategoryTotals, Transaction};

/// Assigns exactly one category to each transaction.
///
/// Owns its rule table. Custom rules only affect this instance, so isolated
/// categorizers can run side by side.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: RuleTable,
}

impl Categorizer {
    /// Creates a categorizer with the built-in rules.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in pattern fails to compile.
    pub fn new() -> Result<Self, CategorizeError> {
        Ok(Self::with_rules(RuleTable::builtin()?))
    }

    /// Creates a categorizer over an explicit rule table.
    #[must_use]
    pub const fn with_rules(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Returns the active rule table.
    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Categorizes a single transaction.
    ///
    /// Special rules win regardless of direction. Standard rules must also
    /// agree on polarity. Unmatched transactions fall back to `Other Income`
    /// or `Awaiting Category - Expense`.
    #[must_use]
    pub fn categorize(&self, transaction: &Transaction) -> Category {
        let description = transaction.description.to_lowercase();
        let is_income = transaction.is_income();

        if let Some(category) = self.rules.match_special(&description) {
            return category.clone();
        }
        if let Some(category) = self.rules.match_standard(&description, is_income) {
            return category.clone();
        }
        Category::fallback(is_income)
    }

    /// Categorizes a batch, preserving input order.
    #[must_use]
    pub fn categorize_all(&self, transactions: &[Transaction]) -> Vec<CategorizedTransaction> {
        let categorized: Vec<_> = transactions
            .iter()
            .map(|txn| CategorizedTransaction::new(txn, self.categorize(txn)))
            .collect();
        log_batch(&categorized);
        categorized
    }

    /// Categorizes a batch across threads, preserving input order.
    ///
    /// Output is identical to [`Categorizer::categorize_all`].
    #[must_use]
    pub fn categorize_all_parallel(
        &self,
        transactions: &[Transaction],
    ) -> Vec<CategorizedTransaction> {
        let categorized: Vec<_> = transactions
            .par_iter()
            .map(|txn| CategorizedTransaction::new(txn, self.categorize(txn)))
            .collect();
        log_batch(&categorized);
        categorized
    }

    /// Registers a regular-expression rule under `category`.
    ///
    /// The pattern is appended to the standard table; an unknown category
    /// gets a new bucket at the end. Already categorized records are not
    /// revisited.
    ///
    /// # Errors
    ///
    /// Returns an error if the category or pattern is blank or the pattern
    /// is not a valid regular expression.
    pub fn add_custom_rule(&mut self, category: &str, pattern: &str) -> Result<(), CategorizeError> {
        self.add_custom_rule_with(category, pattern, MatchType::Regex)
    }

    /// Registers a rule with an explicit match type.
    ///
    /// # Errors
    ///
    /// Same as [`Categorizer::add_custom_rule`].
    pub fn add_custom_rule_with(
        &mut self,
        category: &str,
        pattern: &str,
        match_type: MatchType,
    ) -> Result<(), CategorizeError> {
        if category.trim().is_empty() {
            return Err(CategorizeError::EmptyCategory);
        }
        if pattern.trim().is_empty() {
            return Err(CategorizeError::EmptyPattern {
                category: category.to_string(),
            });
        }

        let category = Category::from_name(category);
        let compiled = Pattern::new(pattern, match_type)?;
        debug!(%category, pattern, ?match_type, "Registered custom rule");
        self.rules.push_standard(category, compiled);
        Ok(())
    }

    /// Sums absolute amounts per category.
    #[must_use]
    pub fn category_totals(categorized: &[CategorizedTransaction]) -> CategoryTotals {
        CategoryTotals::from_transactions(categorized)
    }

    /// Returns the records awaiting manual review.
    #[must_use]
    pub fn uncategorized(categorized: &[CategorizedTransaction]) -> Vec<&CategorizedTransaction> {
        categorized
            .iter()
            .filter(|txn| txn.category.is_awaiting_review())
            .collect()
    }

    /// Summarizes a categorized batch.
    ///
    /// Revenue excludes Returns & Allowances. Expenses include transactions
    /// still awaiting a category.
    #[must_use]
    pub fn summarize(categorized: &[CategorizedTransaction]) -> CategorizationSummary {
        let totals = CategoryTotals::from_transactions(categorized);
        let total_revenue: Decimal = Category::INCOME.iter().map(|c| totals.get(c)).sum();
        let total_expenses = totals.group_total(CategoryGroup::CostOfSales)
            + totals.group_total(CategoryGroup::OperatingExpense)
            + totals.group_total(CategoryGroup::Awaiting);

        CategorizationSummary {
            transaction_count: categorized.len(),
            categories_used: totals.len(),
            needs_review: Self::uncategorized(categorized).len(),
            total_revenue,
            total_expenses,
            net: total_revenue - total_expenses,
        }
    }
}

fn log_batch(categorized: &[CategorizedTransaction]) {
    let needs_review = categorized
        .iter()
        .filter(|txn| txn.category.is_awaiting_review())
        .count();
    debug!(
        transactions = categorized.len(),
        needs_review, "Categorized transaction batch"
    );
    if needs_review > 0 {
        warn!(needs_review, "Transactions need manual categorization");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tallybook_shared::types::{AccountRef, TransactionId};

    fn txn(id: &str, description: &str, amount: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
            amount,
            description: description.to_string(),
            account_id: AccountRef::new("wells_fargo_checking"),
            merchant_name: None,
        }
    }

    fn categorizer() -> Categorizer {
        Categorizer::new().unwrap()
    }

    #[rstest]
    #[case("Stripe Transfer", dec!(-2450.00), Category::SalesRevenue)]
    #[case("Adobe Creative Cloud", dec!(52.99), Category::SoftwareAndWebHosting)]
    #[case("Zelle to Ruben Ruiz", dec!(500), Category::MemberDrawing)]
    #[case("Zelle to Ruben Ruiz", dec!(-500), Category::MemberDrawing)]
    #[case("Transfer from personal savings", dec!(-1000), Category::MemberContribution)]
    #[case("Stripe Capital Repayment", dec!(300), Category::LoanPayment)]
    #[case("Interest Earned", dec!(-1.25), Category::InterestIncome)]
    #[case("Amazon Refund", dec!(-25), Category::OtherIncome)]
    #[case("Customer Chargeback", dec!(-80), Category::ReturnsAndAllowances)]
    #[case("Upwork Freelancer", dec!(600), Category::CostOfService)]
    #[case("Starbucks Coffee", dec!(12.50), Category::BusinessMeals)]
    #[case("Shell Gas Station", dec!(45), Category::GasAndAuto)]
    #[case("Monthly Fee", dec!(15), Category::BankAndAtmFees)]
    #[case("GEICO Auto Insurance", dec!(120), Category::AutoInsurance)]
    #[case("Stripe Fee", dec!(30), Category::MerchantFees)]
    #[case("Office Depot", dec!(89.99), Category::OfficeSupplies)]
    #[case("Verizon Wireless", dec!(85), Category::PhoneAndInternet)]
    #[case("Bench Accounting", dec!(249), Category::ProfessionalServices)]
    #[case("Rent Payment", dec!(1500), Category::Rent)]
    #[case("PG&E Electric", dec!(140), Category::Utilities)]
    fn test_builtin_categorization(
        #[case] description: &str,
        #[case] amount: Decimal,
        #[case] expected: Category,
    ) {
        assert_eq!(categorizer().categorize(&txn("t", description, amount)), expected);
    }

    #[rstest]
    #[case("Mystery Vendor 123", dec!(40), Category::AwaitingExpense)]
    #[case("Mystery Deposit", dec!(-75), Category::OtherIncome)]
    #[case("", dec!(10), Category::AwaitingExpense)]
    #[case("", dec!(-10), Category::OtherIncome)]
    fn test_fallback(#[case] description: &str, #[case] amount: Decimal, #[case] expected: Category) {
        assert_eq!(categorizer().categorize(&txn("t", description, amount)), expected);
    }

    #[test]
    fn test_revenue_pattern_ignored_for_expense() {
        // Matches a revenue pattern but money went out.
        let category = categorizer().categorize(&txn("t", "Stripe Transfer", dec!(100)));
        assert_eq!(category, Category::AwaitingExpense);
    }

    #[test]
    fn test_expense_pattern_ignored_for_income() {
        let category = categorizer().categorize(&txn("t", "Adobe Refund", dec!(-20)));
        assert_eq!(category, Category::OtherIncome);
    }

    #[test]
    fn test_categorize_all_builds_records_in_order() {
        let input = vec![
            txn("a", "Stripe Transfer", dec!(-2450.00)),
            txn("b", "Adobe Creative Cloud", dec!(52.99)),
            txn("c", "Mystery Vendor 123", dec!(40)),
        ];
        let output = categorizer().categorize_all(&input);

        let ids: Vec<_> = output.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        assert_eq!(output[0].category, Category::SalesRevenue);
        assert!(output[0].is_income);
        assert_eq!(output[0].amount, dec!(2450.00));
        assert_eq!(output[1].category, Category::SoftwareAndWebHosting);
        assert!(!output[1].is_income);
        assert_eq!(output[2].date, "2024-05-14");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input: Vec<_> = (0..200)
            .map(|i| {
                let description = match i % 4 {
                    0 => "Stripe Transfer",
                    1 => "Office Depot",
                    2 => "Zelle to Owner",
                    _ => "Unknown",
                };
                let amount = if i % 2 == 0 { dec!(-10) } else { dec!(10) };
                txn(&format!("t{i}"), description, amount)
            })
            .collect();
        let categorizer = categorizer();
        assert_eq!(
            categorizer.categorize_all(&input),
            categorizer.categorize_all_parallel(&input)
        );
    }

    #[test]
    fn test_custom_rule_effect() {
        let mut categorizer = categorizer();
        let input = txn("w", "Widget Co Payment", dec!(75));
        assert_eq!(categorizer.categorize(&input), Category::AwaitingExpense);

        categorizer.add_custom_rule("Foo", "widget").unwrap();
        assert_eq!(
            categorizer.categorize(&input),
            Category::Custom("Foo".to_string())
        );
    }

    #[test]
    fn test_custom_rule_does_not_leak_between_instances() {
        let mut customized = categorizer();
        customized.add_custom_rule("Foo", "widget").unwrap();

        let pristine = categorizer();
        let input = txn("w", "Widget Co Payment", dec!(75));
        assert_eq!(pristine.categorize(&input), Category::AwaitingExpense);
    }

    #[test]
    fn test_custom_rule_on_chart_category_uses_its_polarity() {
        let mut categorizer = categorizer();
        categorizer
            .add_custom_rule_with("Sales Revenue", "upwork escrow", MatchType::Contains)
            .unwrap();

        let income = txn("u", "Upwork Escrow Payout", dec!(-900));
        assert_eq!(categorizer.categorize(&income), Category::SalesRevenue);

        let expense = txn("u", "Upwork Escrow Payout", dec!(900));
        assert_eq!(categorizer.categorize(&expense), Category::AwaitingExpense);
    }

    #[test]
    fn test_custom_rule_not_retroactive() {
        let mut categorizer = categorizer();
        let before = categorizer.categorize_all(&[txn("w", "Widget Co Payment", dec!(75))]);
        categorizer.add_custom_rule("Foo", "widget").unwrap();
        assert_eq!(before[0].category, Category::AwaitingExpense);
    }

    #[test]
    fn test_custom_rule_validation() {
        let mut categorizer = categorizer();
        let pattern_count = categorizer.rules().pattern_count();

        assert!(matches!(
            categorizer.add_custom_rule("  ", "widget"),
            Err(CategorizeError::EmptyCategory)
        ));
        assert!(matches!(
            categorizer.add_custom_rule("Foo", ""),
            Err(CategorizeError::EmptyPattern { .. })
        ));
        assert!(matches!(
            categorizer.add_custom_rule("Foo", "widget("),
            Err(CategorizeError::InvalidPattern { .. })
        ));
        assert_eq!(categorizer.rules().pattern_count(), pattern_count);
    }

    #[test]
    fn test_uncategorized_filters_awaiting() {
        let categorized = categorizer().categorize_all(&[
            txn("a", "Mystery Vendor 123", dec!(40)),
            txn("b", "Rent Payment", dec!(1500)),
            txn("c", "Mystery Deposit", dec!(-75)),
        ]);
        let review = Categorizer::uncategorized(&categorized);
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].transaction_id.as_str(), "a");
    }

    #[test]
    fn test_category_totals() {
        let categorized = categorizer().categorize_all(&[
            txn("a", "Stripe Transfer", dec!(-1000.10)),
            txn("b", "Stripe Transfer", dec!(-250.15)),
            txn("c", "Rent Payment", dec!(400)),
        ]);
        let totals = Categorizer::category_totals(&categorized);
        assert_eq!(totals.get(&Category::SalesRevenue), dec!(1250.25));
        assert_eq!(totals.get(&Category::Rent), dec!(400));
        assert!(!totals.contains(&Category::Utilities));
    }

    #[test]
    fn test_summarize() {
        let categorized = categorizer().categorize_all(&[
            txn("a", "Stripe Transfer", dec!(-1000)),
            txn("b", "Upwork Freelancer", dec!(200)),
            txn("c", "Rent Payment", dec!(400)),
            txn("d", "Zelle to Owner", dec!(300)),
            txn("e", "Mystery Vendor 123", dec!(50)),
        ]);
        let summary = Categorizer::summarize(&categorized);
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(summary.categories_used, 5);
        assert_eq!(summary.needs_review, 1);
        assert_eq!(summary.total_revenue, dec!(1000));
        assert_eq!(summary.total_expenses, dec!(650));
        assert_eq!(summary.net, dec!(350));
    }

    #[test]
    fn test_summarize_excludes_returns_and_counts_awaiting() {
        let categorized = categorizer().categorize_all(&[
            txn("a", "Stripe Transfer", dec!(-1000)),
            txn("b", "Customer Chargeback", dec!(-100)),
            txn("c", "Mystery Vendor 123", dec!(50)),
        ]);
        assert_eq!(categorized[1].category, Category::ReturnsAndAllowances);
        assert_eq!(categorized[2].category, Category::AwaitingExpense);

        let summary = Categorizer::summarize(&categorized);
        assert_eq!(summary.total_revenue, dec!(1000));
        assert_eq!(summary.total_expenses, dec!(50));
        assert_eq!(summary.net, dec!(950));
    }
}
