//! Domain layer for the Family Ledger backend.
//!
//! This crate contains:
//! - Domain models (User, Family, InviteCode, LedgerEntry)
//! - Pure business services (statistics aggregation)

pub mod models;
pub mod services;
