//! Shared utilities for the Family Ledger backend.
//!
//! This crate contains:
//! - JWT token generation and validation
//! - Password hashing
//! - Common validation helpers
//! - Cursor pagination

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
