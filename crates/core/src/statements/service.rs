//! Statement generation service.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tallybook_shared::ReportingConfig;
use tracing::{info, warn};

use super::error::StatementError;
use super::types::{
    AccountBalances, BalanceAccount, BalanceSheet, FinancialStatements, GeneralLedger,
    IncomeStatement, LedgerRow, LineItem, MONTH_LABELS, MonthlyBreakdown, MonthlyRow, NetIncome,
    StatementSection, TrialBalance, TrialBalanceLine, TrialBalanceTotals,
};
use crate::categorizer::{Category, CategorizedTransaction, CategoryTotals};

/// Label of the always-zero in-transit asset line.
pub const MONEY_IN_TRANSIT: &str = "Money in transit";

/// Label of the retained earnings equity line.
pub const RETAINED_EARNINGS: &str = "Retained Earnings";

/// Builds financial statements from categorized transactions.
///
/// Holds read-only configuration only; every generator is a pure function of
/// its inputs.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    config: ReportingConfig,
    period_start: NaiveDate,
    period_end: NaiveDate,
}

impl StatementBuilder {
    /// Creates a builder for the configured business and fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the fiscal year cannot be represented as dates.
    pub fn new(config: ReportingConfig) -> Result<Self, StatementError> {
        let year = config.period.fiscal_year;
        let period_start = config
            .period
            .start()
            .ok_or(StatementError::InvalidFiscalYear(year))?;
        let period_end = config
            .period
            .end()
            .ok_or(StatementError::InvalidFiscalYear(year))?;

        Ok(Self {
            config,
            period_start,
            period_end,
        })
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Generates the income statement.
    ///
    /// Revenue lists all four revenue categories, with returns and
    /// allowances subtracted. Operating expenses list only positive totals.
    #[must_use]
    pub fn generate_income_statement(&self, totals: &CategoryTotals) -> IncomeStatement {
        let mut revenue = StatementSection::default();
        for category in Category::REVENUE {
            let amount = totals.get(category);
            let signed = if *category == Category::ReturnsAndAllowances {
                -amount
            } else {
                amount
            };
            revenue.push(LineItem::new(category.name(), signed));
        }

        let mut cost_of_sales = StatementSection::default();
        cost_of_sales.push(LineItem::new(
            Category::CostOfService.name(),
            totals.get(&Category::CostOfService),
        ));

        let gross_profit = revenue.total - cost_of_sales.total;

        let mut operating_expenses = StatementSection::default();
        for category in Category::OPERATING_EXPENSES {
            let amount = totals.get(category);
            if amount > Decimal::ZERO {
                operating_expenses.push(LineItem::new(category.name(), amount));
            }
        }

        let net_income = NetIncome::new(gross_profit - operating_expenses.total);

        IncomeStatement {
            report_type: "income_statement".to_string(),
            business_name: self.config.business.name.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            revenue,
            cost_of_sales,
            gross_profit,
            operating_expenses,
            net_income,
        }
    }

    /// Generates the balance sheet.
    ///
    /// Retained earnings come from `net_income`. An imbalance is reported in
    /// the result and logged, never corrected.
    #[must_use]
    pub fn generate_balance_sheet(
        &self,
        balances: &AccountBalances,
        net_income: NetIncome,
    ) -> BalanceSheet {
        let labels = &self.config.accounts;

        let mut assets = StatementSection::default();
        assets.push(LineItem::new(
            &labels.checking,
            balances.get(BalanceAccount::Checking),
        ));
        assets.push(LineItem::new(
            &labels.savings,
            balances.get(BalanceAccount::Savings),
        ));
        assets.push(LineItem::new(
            &labels.merchant_processor,
            balances.get(BalanceAccount::MerchantProcessor),
        ));
        assets.push(LineItem::new(MONEY_IN_TRANSIT, Decimal::ZERO));

        let mut liabilities = StatementSection::default();
        liabilities.push(LineItem::new(
            &labels.credit_card,
            balances.get(BalanceAccount::CreditCard),
        ));
        liabilities.push(LineItem::new(
            &labels.loan_payable,
            balances.get(BalanceAccount::LoanPayable),
        ));

        let mut equity = StatementSection::default();
        equity.push(LineItem::new(
            self.config.member_contribution_label(),
            self.config.equity.owner_contribution,
        ));
        equity.push(LineItem::new(
            self.config.member_drawing_label(),
            -self.config.equity.owner_drawing,
        ));
        equity.push(LineItem::new(RETAINED_EARNINGS, net_income.amount()));

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total;
        let liabilities_and_equity = total_liabilities + total_equity;
        let imbalance = total_assets - liabilities_and_equity;
        let is_balanced = imbalance.is_zero();

        if !is_balanced {
            warn!(
                %total_assets,
                %liabilities_and_equity,
                %imbalance,
                "Balance sheet does not balance"
            );
        }

        BalanceSheet {
            report_type: "balance_sheet".to_string(),
            business_name: self.config.business.name.clone(),
            as_of: self.period_end,
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity,
            is_balanced,
            imbalance,
        }
    }

    /// Generates the trial balance.
    ///
    /// Revenue categories are credit lines; cost of sales and operating
    /// expense categories are debit lines. Only positive totals appear.
    /// Returns & Allowances is contra-revenue and is not listed.
    #[must_use]
    pub fn generate_trial_balance(&self, totals: &CategoryTotals) -> TrialBalance {
        let mut lines = Vec::new();

        for category in Category::INCOME {
            let amount = totals.get(category);
            if amount > Decimal::ZERO {
                lines.push(TrialBalanceLine {
                    account: category.name().to_string(),
                    debit: None,
                    credit: Some(amount),
                });
            }
        }

        let debit_categories = std::iter::once(Category::CostOfService)
            .chain(Category::OPERATING_EXPENSES.iter().cloned());
        for category in debit_categories {
            let amount = totals.get(&category);
            if amount > Decimal::ZERO {
                lines.push(TrialBalanceLine {
                    account: category.name().to_string(),
                    debit: Some(amount),
                    credit: None,
                });
            }
        }

        let total_debit: Decimal = lines.iter().filter_map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().filter_map(|l| l.credit).sum();

        TrialBalance {
            report_type: "trial_balance".to_string(),
            business_name: self.config.business.name.clone(),
            as_of: self.period_end,
            lines,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates the general ledger, one row per transaction, by date.
    ///
    /// Transactions sharing a date keep their input order.
    ///
    /// # Errors
    ///
    /// Returns an error if a transaction date is not `YYYY-MM-DD`.
    pub fn generate_general_ledger(
        &self,
        transactions: &[CategorizedTransaction],
    ) -> Result<GeneralLedger, StatementError> {
        let mut rows = transactions
            .iter()
            .map(|txn| {
                let amount = Some(txn.amount);
                Ok(LedgerRow {
                    date: parse_date(txn)?,
                    transaction_id: txn.transaction_id.clone(),
                    description: txn.description.clone(),
                    account: txn.category.name().to_string(),
                    debit: if txn.is_income { None } else { amount },
                    credit: if txn.is_income { amount } else { None },
                })
            })
            .collect::<Result<Vec<_>, StatementError>>()?;
        rows.sort_by_key(|row| row.date);

        let total_debit = rows.iter().filter_map(|r| r.debit).sum();
        let total_credit = rows.iter().filter_map(|r| r.credit).sum();

        Ok(GeneralLedger {
            report_type: "general_ledger".to_string(),
            business_name: self.config.business.name.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            rows,
            total_debit,
            total_credit,
        })
    }

    /// Generates the category by month breakdown.
    ///
    /// Months are calendar months regardless of year. Cells accumulate
    /// absolute amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if a transaction date is not `YYYY-MM-DD`.
    pub fn generate_monthly_breakdown(
        &self,
        transactions: &[CategorizedTransaction],
    ) -> Result<MonthlyBreakdown, StatementError> {
        let mut grid: BTreeMap<&str, [Decimal; 12]> = BTreeMap::new();
        for txn in transactions {
            let month = parse_date(txn)?.month0() as usize;
            let cells = grid
                .entry(txn.category.name())
                .or_insert([Decimal::ZERO; 12]);
            cells[month] += txn.amount;
        }

        let mut column_totals = [Decimal::ZERO; 12];
        let rows: Vec<MonthlyRow> = grid
            .into_iter()
            .map(|(category, amounts)| {
                for (column, amount) in column_totals.iter_mut().zip(amounts) {
                    *column += amount;
                }
                MonthlyRow {
                    category: category.to_string(),
                    total: amounts.iter().sum(),
                    amounts,
                }
            })
            .collect();
        let grand_total = column_totals.iter().sum();

        Ok(MonthlyBreakdown {
            report_type: "monthly_breakdown".to_string(),
            business_name: self.config.business.name.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            months: MONTH_LABELS.iter().map(ToString::to_string).collect(),
            rows,
            column_totals,
            grand_total,
        })
    }

    /// Generates every statement for a categorized batch.
    ///
    /// The income statement is produced first and its net income feeds the
    /// balance sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if a transaction date is not `YYYY-MM-DD`.
    pub fn generate_all(
        &self,
        transactions: &[CategorizedTransaction],
        balances: &AccountBalances,
    ) -> Result<FinancialStatements, StatementError> {
        let totals = CategoryTotals::from_transactions(transactions);

        let income_statement = self.generate_income_statement(&totals);
        let balance_sheet = self.generate_balance_sheet(balances, income_statement.net_income);
        let trial_balance = self.generate_trial_balance(&totals);
        let general_ledger = self.generate_general_ledger(transactions)?;
        let monthly_breakdown = self.generate_monthly_breakdown(transactions)?;

        info!(
            net_income = %income_statement.net_income.amount(),
            ledger_rows = general_ledger.rows.len(),
            categories = monthly_breakdown.rows.len(),
            balanced = balance_sheet.is_balanced,
            "Generated financial statements"
        );

        Ok(FinancialStatements {
            income_statement,
            balance_sheet,
            trial_balance,
            general_ledger,
            monthly_breakdown,
        })
    }
}

fn parse_date(txn: &CategorizedTransaction) -> Result<NaiveDate, StatementError> {
    NaiveDate::parse_from_str(&txn.date, "%Y-%m-%d").map_err(|_| StatementError::InvalidDate {
        transaction_id: txn.transaction_id.clone(),
        date: txn.date.clone(),
    })
}
