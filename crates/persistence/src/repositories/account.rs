//! Account deletion cascade.
//!
//! Deleting an account touches every table: owned families are handed to
//! another member or removed wholesale, the user's own rows are erased, and
//! finally the user row itself (the authentication identity) goes. The whole
//! cascade runs in a single transaction, so a failure at any step leaves the
//! account fully intact rather than half-deleted.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::metrics::QueryTimer;

/// Counts of what an account deletion removed or reassigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountDeletionOutcome {
    pub families_transferred: u64,
    pub families_deleted: u64,
    pub entries_deleted: u64,
    pub memberships_deleted: u64,
}

/// Repository for the account-deletion cascade.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new AccountRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete a user account and everything that hangs off it.
    ///
    /// For each family the user owns: if other members remain, ownership
    /// passes to the earliest-joined one (ties broken by membership ID) and
    /// the departing owner's membership row is dropped; otherwise the family
    /// is deleted with all its ledger entries, invite codes, and membership
    /// rows. The user's remaining entries and memberships go next, then the
    /// user row itself.
    pub async fn delete_account(
        &self,
        user_id: Uuid,
    ) -> Result<AccountDeletionOutcome, sqlx::Error> {
        let timer = QueryTimer::new("delete_account");
        let mut outcome = AccountDeletionOutcome::default();

        let mut tx = self.pool.begin().await?;

        let owned_families: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM families WHERE owner_id = $1 ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        for family_id in owned_families {
            let successor: Option<Uuid> = sqlx::query_scalar(
                r#"
                SELECT user_id FROM family_members
                WHERE family_id = $1 AND user_id <> $2
                ORDER BY joined_at ASC, id ASC
                LIMIT 1
                "#,
            )
            .bind(family_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

            match successor {
                Some(new_owner_id) => {
                    sqlx::query(
                        r#"
                        UPDATE families SET owner_id = $2, updated_at = NOW() WHERE id = $1
                        "#,
                    )
                    .bind(family_id)
                    .bind(new_owner_id)
                    .execute(&mut *tx)
                    .await?;

                    sqlx::query(
                        r#"
                        UPDATE family_members SET role = 'owner'
                        WHERE family_id = $1 AND user_id = $2
                        "#,
                    )
                    .bind(family_id)
                    .bind(new_owner_id)
                    .execute(&mut *tx)
                    .await?;

                    let removed = sqlx::query(
                        r#"
                        DELETE FROM family_members WHERE family_id = $1 AND user_id = $2
                        "#,
                    )
                    .bind(family_id)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;

                    outcome.families_transferred += 1;
                    outcome.memberships_deleted += removed.rows_affected();

                    info!(
                        family_id = %family_id,
                        new_owner_id = %new_owner_id,
                        "Ownership transferred during account deletion"
                    );
                }
                None => {
                    let entries = sqlx::query(
                        r#"
                        DELETE FROM ledger_entries WHERE family_id = $1
                        "#,
                    )
                    .bind(family_id)
                    .execute(&mut *tx)
                    .await?;

                    sqlx::query(
                        r#"
                        DELETE FROM invite_codes WHERE family_id = $1
                        "#,
                    )
                    .bind(family_id)
                    .execute(&mut *tx)
                    .await?;

                    let memberships = sqlx::query(
                        r#"
                        DELETE FROM family_members WHERE family_id = $1
                        "#,
                    )
                    .bind(family_id)
                    .execute(&mut *tx)
                    .await?;

                    sqlx::query(
                        r#"
                        DELETE FROM families WHERE id = $1
                        "#,
                    )
                    .bind(family_id)
                    .execute(&mut *tx)
                    .await?;

                    outcome.families_deleted += 1;
                    outcome.entries_deleted += entries.rows_affected();
                    outcome.memberships_deleted += memberships.rows_affected();

                    info!(
                        family_id = %family_id,
                        "Sole-member family deleted during account deletion"
                    );
                }
            }
        }

        // Entries the user authored in families that survive.
        let own_entries = sqlx::query(
            r#"
            DELETE FROM ledger_entries WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        outcome.entries_deleted += own_entries.rows_affected();

        // Remaining member-role memberships.
        let own_memberships = sqlx::query(
            r#"
            DELETE FROM family_members WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        outcome.memberships_deleted += own_memberships.rows_affected();

        // The authentication identity itself.
        sqlx::query(
            r#"
            DELETE FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();

        info!(
            user_id = %user_id,
            families_transferred = outcome.families_transferred,
            families_deleted = outcome.families_deleted,
            entries_deleted = outcome.entries_deleted,
            "Account deleted"
        );

        Ok(outcome)
    }
}
