//! Invite code repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{FamilyMembershipEntity, InviteCodeEntity};
use crate::metrics::QueryTimer;

/// Repository for invite-code database operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new invite code for a family.
    ///
    /// Any code still active for the family is marked used in the same
    /// transaction, so at most one active code exists per family.
    pub async fn create_invite(
        &self,
        family_id: Uuid,
        code: &str,
        created_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<InviteCodeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invite_code");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE invite_codes
            SET is_used = true
            WHERE family_id = $1 AND is_used = false
            "#,
        )
        .bind(family_id)
        .execute(&mut *tx)
        .await?;

        let invite = sqlx::query_as::<_, InviteCodeEntity>(
            r#"
            INSERT INTO invite_codes (family_id, code, created_by, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, family_id, code, created_by, created_at, expires_at, is_used
            "#,
        )
        .bind(family_id)
        .bind(code)
        .bind(created_by)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(invite)
    }

    /// Find an active (unused, unexpired) invite code by its literal value.
    pub async fn find_active_by_code(
        &self,
        code: &str,
    ) -> Result<Option<InviteCodeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_invite_by_code");
        let result = sqlx::query_as::<_, InviteCodeEntity>(
            r#"
            SELECT id, family_id, code, created_by, created_at, expires_at, is_used
            FROM invite_codes
            WHERE code = $1 AND is_used = false AND expires_at > NOW()
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a code collides with any currently-active code.
    pub async fn active_code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_active_invite_code_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM invite_codes
                WHERE code = $1 AND is_used = false AND expires_at > NOW()
            )
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Redeem an invite code: insert the membership row and mark the code
    /// used in one transaction.
    ///
    /// The code row is re-checked under the transaction; a concurrent
    /// redemption of the same code makes this return Ok(None) rather than
    /// seating a second member on a spent code.
    pub async fn redeem_invite(
        &self,
        invite_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FamilyMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("redeem_invite_code");

        let mut tx = self.pool.begin().await?;

        let spent = sqlx::query_as::<_, InviteCodeEntity>(
            r#"
            UPDATE invite_codes
            SET is_used = true
            WHERE id = $1 AND is_used = false AND expires_at > NOW()
            RETURNING id, family_id, code, created_by, created_at, expires_at, is_used
            "#,
        )
        .bind(invite_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(invite) = spent else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        let membership = sqlx::query_as::<_, FamilyMembershipEntity>(
            r#"
            INSERT INTO family_members (family_id, user_id, role)
            VALUES ($1, $2, 'member')
            RETURNING id, family_id, user_id, role, joined_at
            "#,
        )
        .bind(invite.family_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(membership))
    }
}
