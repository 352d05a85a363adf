//! Statement data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tallybook_shared::types::{TransactionId, money};

/// A labelled amount on a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line label.
    pub label: String,
    /// Exact amount.
    pub amount: Decimal,
}

impl LineItem {
    /// Creates a line item.
    #[must_use]
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// Amount rounded to cents for display.
    #[must_use]
    pub fn display_amount(&self) -> Decimal {
        money::to_display(self.amount)
    }
}

/// A statement section (revenue, assets, equity, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSection {
    /// Section total.
    pub total: Decimal,
    /// Lines in this section.
    pub lines: Vec<LineItem>,
}

impl StatementSection {
    /// Appends a line and adds it to the total.
    pub fn push(&mut self, line: LineItem) {
        self.total += line.amount;
        self.lines.push(line);
    }
}

/// Net income produced by the income statement.
///
/// The balance sheet takes this as an argument, so it cannot be built before
/// an income statement exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetIncome(Decimal);

impl NetIncome {
    /// Wraps an externally computed net income.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

/// Income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Report type identifier.
    pub report_type: String,
    /// Business name.
    pub business_name: String,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Revenue section (returns & allowances shown negative).
    pub revenue: StatementSection,
    /// Cost of sales section.
    pub cost_of_sales: StatementSection,
    /// Gross profit (revenue - cost of sales).
    pub gross_profit: Decimal,
    /// Operating expenses section, positive lines only.
    pub operating_expenses: StatementSection,
    /// Net income (gross profit - operating expenses).
    pub net_income: NetIncome,
}

/// Externally balanced accounts shown on the balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceAccount {
    /// Business checking (asset).
    Checking,
    /// Business savings (asset).
    Savings,
    /// Merchant processor balance (asset).
    MerchantProcessor,
    /// Credit card (liability).
    CreditCard,
    /// Loan payable (liability).
    LoanPayable,
}

/// Per-account balances supplied by the caller.
///
/// Missing accounts read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountBalances(BTreeMap<BalanceAccount, Decimal>);

impl AccountBalances {
    /// Creates an empty set of balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, account: BalanceAccount, balance: Decimal) -> Self {
        self.set(account, balance);
        self
    }

    /// Sets a balance, replacing any previous one.
    pub fn set(&mut self, account: BalanceAccount, balance: Decimal) {
        self.0.insert(account, balance);
    }

    /// Balance for an account, zero if absent.
    #[must_use]
    pub fn get(&self, account: BalanceAccount) -> Decimal {
        self.0.get(&account).copied().unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<(BalanceAccount, Decimal)> for AccountBalances {
    fn from_iter<I: IntoIterator<Item = (BalanceAccount, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Report type identifier.
    pub report_type: String,
    /// Business name.
    pub business_name: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: StatementSection,
    /// Liabilities section.
    pub liabilities: StatementSection,
    /// Equity section.
    pub equity: StatementSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
    /// Assets minus liabilities and equity.
    pub imbalance: Decimal,
}

/// Debit or credit side of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

/// One account line on the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    /// Account (category) name.
    pub account: String,
    /// Debit amount, if a debit line.
    pub debit: Option<Decimal>,
    /// Credit amount, if a credit line.
    pub credit: Option<Decimal>,
}

/// Trial balance totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Report type identifier.
    pub report_type: String,
    /// Business name.
    pub business_name: String,
    /// As of date.
    pub as_of: NaiveDate,
    /// Credit lines first, then debit lines.
    pub lines: Vec<TrialBalanceLine>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// One general ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Posting date.
    pub date: NaiveDate,
    /// Source transaction.
    pub transaction_id: TransactionId,
    /// Description.
    pub description: String,
    /// Account (category) name.
    pub account: String,
    /// Debit amount, set for expenses.
    pub debit: Option<Decimal>,
    /// Credit amount, set for income.
    pub credit: Option<Decimal>,
}

impl LedgerRow {
    /// Side of the row.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        if self.credit.is_some() {
            EntryType::Credit
        } else {
            EntryType::Debit
        }
    }
}

/// General ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedger {
    /// Report type identifier.
    pub report_type: String,
    /// Business name.
    pub business_name: String,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Rows, by date ascending.
    pub rows: Vec<LedgerRow>,
    /// Sum of debit column.
    pub total_debit: Decimal,
    /// Sum of credit column.
    pub total_credit: Decimal,
}

/// Month column headers.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One category row of the monthly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
    /// Category name.
    pub category: String,
    /// Amount per calendar month, January first.
    pub amounts: [Decimal; 12],
    /// Row total.
    pub total: Decimal,
}

/// Category by month breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// Report type identifier.
    pub report_type: String,
    /// Business name.
    pub business_name: String,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Column headers.
    pub months: Vec<String>,
    /// Rows, alphabetical by category.
    pub rows: Vec<MonthlyRow>,
    /// Per-month totals across rows.
    pub column_totals: [Decimal; 12],
    /// Sum of every cell.
    pub grand_total: Decimal,
}

/// All five statements from one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatements {
    /// Income statement.
    pub income_statement: IncomeStatement,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Trial balance.
    pub trial_balance: TrialBalance,
    /// General ledger.
    pub general_ledger: GeneralLedger,
    /// Monthly breakdown.
    pub monthly_breakdown: MonthlyBreakdown,
}
