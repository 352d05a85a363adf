//! Chart of categories.
//!
//! Every categorized transaction carries exactly one `Category`. The fixed
//! chart is partitioned into groups that decide statement placement and the
//! polarity a rule must satisfy.

use serde::{Deserialize, Serialize};

/// Marker substring shared by every category awaiting manual review.
pub const AWAITING_MARKER: &str = "Awaiting Category";

/// Top-level group a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    /// Revenue and contra-revenue.
    Revenue,
    /// Direct cost of delivering the service.
    CostOfSales,
    /// Operating expenses.
    OperatingExpense,
    /// Owner transfers and loan payments (liability/equity movements).
    Special,
    /// Catch-all awaiting manual review.
    Awaiting,
    /// User-defined bucket created by a custom rule.
    Custom,
}

/// Which side of the cash flow a category may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Money received (negative upstream amount).
    Income,
    /// Money spent (non-negative upstream amount).
    Expense,
    /// Either side.
    Any,
}

impl Polarity {
    /// Returns true if a transaction with the given direction is admitted.
    #[must_use]
    pub const fn admits(self, is_income: bool) -> bool {
        match self {
            Self::Income => is_income,
            Self::Expense => !is_income,
            Self::Any => true,
        }
    }
}

/// An accounting category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    /// Sales Revenue
    SalesRevenue,
    /// Returns & Allowances (contra-revenue)
    ReturnsAndAllowances,
    /// Interest Income
    InterestIncome,
    /// Other Income (also the income-side fallback)
    OtherIncome,
    /// Cost of Service
    CostOfService,
    /// Software & Web Hosting Expense
    SoftwareAndWebHosting,
    /// Business Meals Expense
    BusinessMeals,
    /// Gas & Auto Expense
    GasAndAuto,
    /// Bank & ATM Fee Expense
    BankAndAtmFees,
    /// Insurance Expense - Auto
    AutoInsurance,
    /// Insurance Expense - Business
    BusinessInsurance,
    /// Merchant Fees Expense
    MerchantFees,
    /// Office Supply Expense
    OfficeSupplies,
    /// Phone & Internet Expense
    PhoneAndInternet,
    /// Professional Service Expense
    ProfessionalServices,
    /// Rent Expense
    Rent,
    /// Utilities Expense
    Utilities,
    /// Member Drawing (owner draw)
    MemberDrawing,
    /// Member Contribution (owner capital in)
    MemberContribution,
    /// Loan Payment
    LoanPayment,
    /// Awaiting Category - Expense (expense-side fallback)
    AwaitingExpense,
    /// A category introduced by a custom rule.
    Custom(String),
}

impl Category {
    /// Revenue group, in income statement order.
    pub const REVENUE: &'static [Self] = &[
        Self::SalesRevenue,
        Self::ReturnsAndAllowances,
        Self::InterestIncome,
        Self::OtherIncome,
    ];

    /// Revenue categories with a credit normal balance.
    ///
    /// Returns & Allowances is contra-revenue and is left out.
    pub const INCOME: &'static [Self] = &[
        Self::SalesRevenue,
        Self::InterestIncome,
        Self::OtherIncome,
    ];

    /// Operating expense categories, in statement order.
    pub const OPERATING_EXPENSES: &'static [Self] = &[
        Self::SoftwareAndWebHosting,
        Self::BusinessMeals,
        Self::GasAndAuto,
        Self::BankAndAtmFees,
        Self::AutoInsurance,
        Self::BusinessInsurance,
        Self::MerchantFees,
        Self::OfficeSupplies,
        Self::PhoneAndInternet,
        Self::ProfessionalServices,
        Self::Rent,
        Self::Utilities,
    ];

    /// Owner transfer and loan categories.
    pub const SPECIAL: &'static [Self] = &[
        Self::MemberDrawing,
        Self::MemberContribution,
        Self::LoanPayment,
    ];

    /// Every category of the fixed chart.
    pub const CHART: &'static [Self] = &[
        Self::SalesRevenue,
        Self::ReturnsAndAllowances,
        Self::InterestIncome,
        Self::OtherIncome,
        Self::CostOfService,
        Self::SoftwareAndWebHosting,
        Self::BusinessMeals,
        Self::GasAndAuto,
        Self::BankAndAtmFees,
        Self::AutoInsurance,
        Self::BusinessInsurance,
        Self::MerchantFees,
        Self::OfficeSupplies,
        Self::PhoneAndInternet,
        Self::ProfessionalServices,
        Self::Rent,
        Self::Utilities,
        Self::MemberDrawing,
        Self::MemberContribution,
        Self::LoanPayment,
        Self::AwaitingExpense,
    ];

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SalesRevenue => "Sales Revenue",
            Self::ReturnsAndAllowances => "Returns & Allowances",
            Self::InterestIncome => "Interest Income",
            Self::OtherIncome => "Other Income",
            Self::CostOfService => "Cost of Service",
            Self::SoftwareAndWebHosting => "Software & Web Hosting Expense",
            Self::BusinessMeals => "Business Meals Expense",
            Self::GasAndAuto => "Gas & Auto Expense",
            Self::BankAndAtmFees => "Bank & ATM Fee Expense",
            Self::AutoInsurance => "Insurance Expense - Auto",
            Self::BusinessInsurance => "Insurance Expense - Business",
            Self::MerchantFees => "Merchant Fees Expense",
            Self::OfficeSupplies => "Office Supply Expense",
            Self::PhoneAndInternet => "Phone & Internet Expense",
            Self::ProfessionalServices => "Professional Service Expense",
            Self::Rent => "Rent Expense",
            Self::Utilities => "Utilities Expense",
            Self::MemberDrawing => "Member Drawing",
            Self::MemberContribution => "Member Contribution",
            Self::LoanPayment => "Loan Payment",
            Self::AwaitingExpense => "Awaiting Category - Expense",
            Self::Custom(name) => name,
        }
    }

    /// Resolves a name to a chart category, or a custom one if unknown.
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        Self::CHART
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Self::Custom(trimmed.to_string()))
    }

    /// Returns the group this category belongs to.
    #[must_use]
    pub const fn group(&self) -> CategoryGroup {
        match self {
            Self::SalesRevenue
            | Self::ReturnsAndAllowances
            | Self::InterestIncome
            | Self::OtherIncome => CategoryGroup::Revenue,
            Self::CostOfService => CategoryGroup::CostOfSales,
            Self::SoftwareAndWebHosting
            | Self::BusinessMeals
            | Self::GasAndAuto
            | Self::BankAndAtmFees
            | Self::AutoInsurance
            | Self::BusinessInsurance
            | Self::MerchantFees
            | Self::OfficeSupplies
            | Self::PhoneAndInternet
            | Self::ProfessionalServices
            | Self::Rent
            | Self::Utilities => CategoryGroup::OperatingExpense,
            Self::MemberDrawing | Self::MemberContribution | Self::LoanPayment => {
                CategoryGroup::Special
            }
            Self::AwaitingExpense => CategoryGroup::Awaiting,
            Self::Custom(_) => CategoryGroup::Custom,
        }
    }

    /// Returns the implicit polarity of the category.
    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        match self.group() {
            CategoryGroup::Revenue => Polarity::Income,
            CategoryGroup::Special => Polarity::Any,
            CategoryGroup::CostOfSales
            | CategoryGroup::OperatingExpense
            | CategoryGroup::Awaiting
            | CategoryGroup::Custom => Polarity::Expense,
        }
    }

    /// Polarity a rule for this category must satisfy in the standard table.
    ///
    /// Only revenue rules require income; everything else, including special
    /// categories placed in the standard table, requires an expense.
    #[must_use]
    pub const fn standard_polarity(&self) -> Polarity {
        match self.group() {
            CategoryGroup::Revenue => Polarity::Income,
            _ => Polarity::Expense,
        }
    }

    /// Fallback used when no rule matches.
    #[must_use]
    pub const fn fallback(is_income: bool) -> Self {
        if is_income {
            Self::OtherIncome
        } else {
            Self::AwaitingExpense
        }
    }

    /// Returns true if the category signals manual review.
    #[must_use]
    pub fn is_awaiting_review(&self) -> bool {
        self.name().contains(AWAITING_MARKER)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            other => other.name().to_string(),
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_names_round_trip() {
        for category in Category::CHART {
            assert_eq!(&Category::from_name(category.name()), category);
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Category::from_name("rent expense"), Category::Rent);
        assert_eq!(
            Category::from_name("  Sales Revenue "),
            Category::SalesRevenue
        );
    }

    #[test]
    fn test_unknown_name_is_custom() {
        let category = Category::from_name("Foo");
        assert_eq!(category, Category::Custom("Foo".to_string()));
        assert_eq!(category.group(), CategoryGroup::Custom);
        assert_eq!(category.polarity(), Polarity::Expense);
    }

    #[test]
    fn test_groups_partition_chart() {
        assert_eq!(Category::REVENUE.len(), 4);
        assert_eq!(Category::OPERATING_EXPENSES.len(), 12);
        assert!(Category::INCOME.iter().all(|c| Category::REVENUE.contains(c)));
        assert!(!Category::INCOME.contains(&Category::ReturnsAndAllowances));
        assert!(
            Category::REVENUE
                .iter()
                .all(|c| c.group() == CategoryGroup::Revenue)
        );
        assert!(
            Category::OPERATING_EXPENSES
                .iter()
                .all(|c| c.group() == CategoryGroup::OperatingExpense)
        );
        assert!(Category::SPECIAL.iter().all(|c| c.polarity() == Polarity::Any));
        assert_eq!(Category::CostOfService.group(), CategoryGroup::CostOfSales);
    }

    #[test]
    fn test_polarity_admits() {
        assert!(Polarity::Income.admits(true));
        assert!(!Polarity::Income.admits(false));
        assert!(Polarity::Expense.admits(false));
        assert!(!Polarity::Expense.admits(true));
        assert!(Polarity::Any.admits(true) && Polarity::Any.admits(false));
    }

    #[test]
    fn test_standard_polarity_of_special_is_expense() {
        assert_eq!(Category::LoanPayment.standard_polarity(), Polarity::Expense);
        assert_eq!(Category::InterestIncome.standard_polarity(), Polarity::Income);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(Category::fallback(true), Category::OtherIncome);
        assert_eq!(Category::fallback(false), Category::AwaitingExpense);
        assert!(Category::AwaitingExpense.is_awaiting_review());
        assert!(!Category::OtherIncome.is_awaiting_review());
        assert!(Category::from_name("Awaiting Category - Income").is_awaiting_review());
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Category::AutoInsurance).unwrap();
        assert_eq!(json, "\"Insurance Expense - Auto\"");

        let back: Category = serde_json::from_str("\"Bank & ATM Fee Expense\"").unwrap();
        assert_eq!(back, Category::BankAndAtmFees);

        let custom: Category = serde_json::from_str("\"Foo\"").unwrap();
        assert_eq!(custom, Category::Custom("Foo".to_string()));
    }
}
