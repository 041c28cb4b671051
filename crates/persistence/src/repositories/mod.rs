//! Repository implementations.

mod account;
mod family;
mod invite;
mod ledger;
mod user;

pub use account::{AccountDeletionOutcome, AccountRepository};
pub use family::FamilyRepository;
pub use invite::InviteRepository;
pub use ledger::LedgerRepository;
pub use user::UserRepository;
