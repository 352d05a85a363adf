//! Reporting configuration management.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Reporting configuration.
///
/// Every section has defaults, so an empty source yields a usable config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Business identity shown in statement headers.
    pub business: BusinessConfig,
    /// Reporting period.
    pub period: PeriodConfig,
    /// Fixed owner equity figures for the balance sheet.
    pub equity: EquityConfig,
    /// Display labels for balance sheet accounts.
    pub accounts: AccountLabels,
}

/// Business configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// Business name.
    pub name: String,
    /// Owner name, used in the member equity line labels.
    pub owner_name: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "My Business".to_string(),
            owner_name: String::new(),
        }
    }
}

/// Reporting period configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    /// Calendar year covered by the statements.
    pub fiscal_year: i32,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self { fiscal_year: 2024 }
    }
}

impl PeriodConfig {
    /// First day of the fiscal year, if the year is representable.
    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.fiscal_year, 1, 1)
    }

    /// Last day of the fiscal year, if the year is representable.
    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.fiscal_year, 12, 31)
    }
}

/// Owner equity figures.
///
/// These are configured rather than derived from the categorized owner
/// draw/contribution transactions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Cumulative owner contribution (shown positive).
    pub owner_contribution: Decimal,
    /// Cumulative owner drawing (stored positive, shown negative).
    pub owner_drawing: Decimal,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            owner_contribution: Decimal::new(867_915, 2),
            owner_drawing: Decimal::new(3_130_425, 2),
        }
    }
}

/// Display labels for the externally balanced accounts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountLabels {
    /// Checking account label.
    pub checking: String,
    /// Savings account label.
    pub savings: String,
    /// Merchant processor account label.
    pub merchant_processor: String,
    /// Credit card label.
    pub credit_card: String,
    /// Loan payable label.
    pub loan_payable: String,
}

impl Default for AccountLabels {
    fn default() -> Self {
        Self {
            checking: "Checking".to_string(),
            savings: "Savings".to_string(),
            merchant_processor: "Merchant Processor".to_string(),
            credit_card: "Credit Card".to_string(),
            loan_payable: "Loan Payable".to_string(),
        }
    }
}

impl ReportingConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TALLYBOOK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLYBOOK").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Label for the owner contribution equity line.
    #[must_use]
    pub fn member_contribution_label(&self) -> String {
        owner_label("Member Contribution", &self.business.owner_name)
    }

    /// Label for the owner drawing equity line.
    #[must_use]
    pub fn member_drawing_label(&self) -> String {
        owner_label("Member Drawing", &self.business.owner_name)
    }
}

fn owner_label(base: &str, owner: &str) -> String {
    if owner.trim().is_empty() {
        base.to_string()
    } else {
        format!("{base} - {owner}")
    }
}
