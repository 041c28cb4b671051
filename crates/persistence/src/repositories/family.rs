//! Family repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    FamilyEntity, FamilyMembershipEntity, FamilyWithMembershipEntity, MemberWithUserEntity,
};
use crate::metrics::QueryTimer;

/// Repository for family-related database operations.
#[derive(Clone)]
pub struct FamilyRepository {
    pool: PgPool,
}

impl FamilyRepository {
    /// Creates a new FamilyRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new family and add the creator as owner.
    ///
    /// Both rows are written in one transaction so a failure can never
    /// leave an ownerless family behind.
    pub async fn create_family(
        &self,
        name: &str,
        description: Option<&str>,
        owner_id: Uuid,
    ) -> Result<FamilyEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_family");

        let mut tx = self.pool.begin().await?;

        let family = sqlx::query_as::<_, FamilyEntity>(
            r#"
            INSERT INTO families (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO family_members (family_id, user_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(family.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(family)
    }

    /// Find a family by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FamilyEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_family_by_id");
        let result = sqlx::query_as::<_, FamilyEntity>(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM families
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find all families a user belongs to, with membership info and
    /// member counts, most recently joined first.
    pub async fn find_user_families(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FamilyWithMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_families");
        let result = sqlx::query_as::<_, FamilyWithMembershipEntity>(
            r#"
            SELECT
                f.id, f.name, f.description, f.owner_id, f.created_at, f.updated_at,
                fm.role, fm.joined_at,
                (SELECT COUNT(*) FROM family_members WHERE family_id = f.id) as member_count
            FROM families f
            JOIN family_members fm ON f.id = fm.family_id
            WHERE fm.user_id = $1
            ORDER BY fm.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a family with the requesting user's membership info.
    pub async fn find_family_with_membership(
        &self,
        family_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FamilyWithMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_family_with_membership");
        let result = sqlx::query_as::<_, FamilyWithMembershipEntity>(
            r#"
            SELECT
                f.id, f.name, f.description, f.owner_id, f.created_at, f.updated_at,
                fm.role, fm.joined_at,
                (SELECT COUNT(*) FROM family_members WHERE family_id = f.id) as member_count
            FROM families f
            JOIN family_members fm ON f.id = fm.family_id
            WHERE f.id = $1 AND fm.user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get a user's membership for a family.
    pub async fn get_membership(
        &self,
        family_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<FamilyMembershipEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_family_membership");
        let result = sqlx::query_as::<_, FamilyMembershipEntity>(
            r#"
            SELECT id, family_id, user_id, role, joined_at
            FROM family_members
            WHERE family_id = $1 AND user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List members of a family with profile info, earliest joined first.
    pub async fn list_members(
        &self,
        family_id: Uuid,
    ) -> Result<Vec<MemberWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_family_members");
        let result = sqlx::query_as::<_, MemberWithUserEntity>(
            r#"
            SELECT
                fm.id, fm.family_id, fm.user_id, fm.role, fm.joined_at,
                u.nickname, u.avatar_url
            FROM family_members fm
            JOIN users u ON fm.user_id = u.id
            WHERE fm.family_id = $1
            ORDER BY fm.joined_at ASC, fm.id ASC
            "#,
        )
        .bind(family_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a member from a family.
    pub async fn remove_member(&self, family_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_family_member");
        let result = sqlx::query(
            r#"
            DELETE FROM family_members
            WHERE family_id = $1 AND user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Transfer family ownership atomically.
    ///
    /// Updates the family's owner_id, demotes the current owner to member
    /// and promotes the new owner, all in one transaction so the
    /// single-owner invariant can never be observed broken.
    pub async fn transfer_ownership(
        &self,
        family_id: Uuid,
        current_owner_id: Uuid,
        new_owner_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("transfer_family_ownership");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE families
            SET owner_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(family_id)
        .bind(new_owner_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE family_members
            SET role = 'member'
            WHERE family_id = $1 AND user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(current_owner_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE family_members
            SET role = 'owner'
            WHERE family_id = $1 AND user_id = $2
            "#,
        )
        .bind(family_id)
        .bind(new_owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}
