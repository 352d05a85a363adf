//! Transaction categorization.
//!
//! This module assigns bookkeeping categories to raw bank transactions:
//! - Fixed chart of categories with groups and polarity
//! - Ordered, case-insensitive pattern rules (special rules first)
//! - Polarity-aware fallback for unmatched transactions
//! - Per-category totals and review queues

pub mod category;
pub mod error;
pub mod rules;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use category::{AWAITING_MARKER, Category, CategoryGroup, Polarity};
pub use error::CategorizeError;
pub use rules::{MatchType, Pattern, RuleSet, RuleTable};
pub use service::Categorizer;
pub use types::{CategorizationSummary, CategorizedTransaction, CategoryTotals, Transaction};
