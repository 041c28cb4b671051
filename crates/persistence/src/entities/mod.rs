//! Database entity definitions (row mappings).

mod family;
mod invite;
mod ledger;
mod user;

pub use family::{
    FamilyEntity, FamilyMembershipEntity, FamilyRoleDb, FamilyWithMembershipEntity,
    MemberWithUserEntity,
};
pub use invite::InviteCodeEntity;
pub use ledger::{EntryWithAuthorEntity, LedgerEntryEntity};
pub use user::UserEntity;
