//! Domain models.

pub mod family;
pub mod invite;
pub mod ledger;
pub mod stats;
pub mod user;

pub use family::{Family, FamilyMembership, FamilyRole};
pub use invite::InviteCode;
pub use ledger::LedgerEntry;
pub use user::User;
