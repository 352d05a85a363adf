//! Core bookkeeping logic for Tallybook.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! Categorization rules, statement arithmetic and their domain types live here.
//!
//! # Modules
//!
//! - `categorizer` - Rule-based transaction categorization
//! - `statements` - Income statement, balance sheet, trial balance, ledger and
//!   monthly breakdown generation

pub mod categorizer;
pub mod statements;
