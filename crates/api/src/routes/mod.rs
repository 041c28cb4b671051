//! HTTP route handlers.

pub mod auth;
pub mod families;
pub mod health;
pub mod invites;
pub mod ledger;
pub mod stats;
pub mod users;
