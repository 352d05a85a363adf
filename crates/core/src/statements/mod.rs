//! Financial statement generation.
//!
//! This module turns categorized transactions into statements:
//! - Income Statement
//! - Balance Sheet
//! - Trial Balance
//! - General Ledger
//! - Monthly Breakdown

pub mod error;
pub mod service;
pub mod types;


pub use error::StatementError;
pub use service::{MONEY_IN_TRANSIT, RETAINED_EARNINGS, StatementBuilder};
pub use types::*;
