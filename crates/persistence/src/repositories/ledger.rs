//! Ledger entry repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EntryWithAuthorEntity, LedgerEntryEntity};
use crate::metrics::QueryTimer;

/// Repository for ledger-entry database operations.
#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new ledger entry.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_entry(
        &self,
        family_id: Uuid,
        user_id: Uuid,
        amount: i64,
        category_id: Option<Uuid>,
        description: Option<&str>,
        photo_url: Option<&str>,
        entry_date: NaiveDate,
    ) -> Result<LedgerEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_ledger_entry");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            INSERT INTO ledger_entries (family_id, user_id, amount, category_id, description, photo_url, entry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
            "#,
        )
        .bind(family_id)
        .bind(user_id)
        .bind(amount)
        .bind(category_id)
        .bind(description)
        .bind(photo_url)
        .bind(entry_date)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an entry by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LedgerEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_ledger_entry_by_id");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            SELECT id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
            FROM ledger_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update an entry. Absent fields keep their value; category can only
    /// be replaced, not cleared, which matches how the client uses it.
    pub async fn update_entry(
        &self,
        id: Uuid,
        amount: Option<i64>,
        category_id: Option<Uuid>,
        description: Option<&str>,
        photo_url: Option<&str>,
        entry_date: Option<NaiveDate>,
    ) -> Result<LedgerEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_ledger_entry");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            UPDATE ledger_entries
            SET
                amount = COALESCE($2, amount),
                category_id = COALESCE($3, category_id),
                description = COALESCE($4, description),
                photo_url = COALESCE($5, photo_url),
                entry_date = COALESCE($6, entry_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(category_id)
        .bind(description)
        .bind(photo_url)
        .bind(entry_date)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an entry.
    pub async fn delete_entry(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_ledger_entry");
        let result = sqlx::query(
            r#"
            DELETE FROM ledger_entries WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List entries for a family, newest first, keyset-paginated on
    /// (created_at, id).
    pub async fn list_entries(
        &self,
        family_id: Uuid,
        before: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<LedgerEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_ledger_entries");

        let result = if let Some((created_at, id)) = before {
            sqlx::query_as::<_, LedgerEntryEntity>(
                r#"
                SELECT id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
                FROM ledger_entries
                WHERE family_id = $1 AND (created_at, id) < ($2, $3)
                ORDER BY created_at DESC, id DESC
                LIMIT $4
                "#,
            )
            .bind(family_id)
            .bind(created_at)
            .bind(id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, LedgerEntryEntity>(
                r#"
                SELECT id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
                FROM ledger_entries
                WHERE family_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(family_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        };

        timer.record();
        result
    }

    /// Fetch all entries whose entry_date falls within [first, last].
    pub async fn entries_in_window(
        &self,
        family_id: Uuid,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<LedgerEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("ledger_entries_in_window");
        let result = sqlx::query_as::<_, LedgerEntryEntity>(
            r#"
            SELECT id, family_id, user_id, amount, category_id, description, photo_url, entry_date, created_at, updated_at
            FROM ledger_entries
            WHERE family_id = $1 AND entry_date BETWEEN $2 AND $3
            "#,
        )
        .bind(family_id)
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch entries in the window joined with the author's nickname.
    ///
    /// LEFT JOIN keeps entries whose author has deleted their account; the
    /// nickname comes back NULL for those.
    pub async fn entries_with_author_in_window(
        &self,
        family_id: Uuid,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<EntryWithAuthorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("ledger_entries_with_author_in_window");
        let result = sqlx::query_as::<_, EntryWithAuthorEntity>(
            r#"
            SELECT le.user_id, le.amount, u.nickname
            FROM ledger_entries le
            LEFT JOIN users u ON le.user_id = u.id
            WHERE le.family_id = $1 AND le.entry_date BETWEEN $2 AND $3
            "#,
        )
        .bind(family_id)
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
