use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::announcement::{
        ActiveAt, Announcement, AnnouncementChanges, AnnouncementField, FieldPatch,
        NewAnnouncement, SortOrder,
    },
};

/// Persistence for announcement records. Every call is a single operation
/// against the backing store; failures surface as `AppError::Internal`.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Persists a new record and returns its freshly assigned id.
    async fn insert(&self, record: NewAnnouncement) -> AppResult<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>>;

    /// All records, optionally restricted to those active at an instant.
    /// Ties on `created_at` keep insertion order.
    async fn find_all(
        &self,
        filter: Option<&ActiveAt>,
        sort: SortOrder,
    ) -> AppResult<Vec<Announcement>>;

    /// Applies all changes to one record atomically. `false` if no such record.
    async fn replace_fields(&self, id: Uuid, changes: AnnouncementChanges) -> AppResult<bool>;

    /// Removes an optional field entirely. `false` if no such record.
    async fn unset_field(&self, id: Uuid, field: AnnouncementField) -> AppResult<bool>;

    /// `false` if no such record.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

const ANNOUNCEMENT_COLS: &str = "id, message, start_date, end_date, created_by, created_at";

#[derive(Clone)]
pub struct PgAnnouncementStore {
    pool: PgPool,
}

impl PgAnnouncementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::NewestFirst => "created_at DESC, seq ASC",
        SortOrder::OldestFirst => "created_at ASC, seq ASC",
    }
}

#[async_trait]
impl AnnouncementStore for PgAnnouncementStore {
    async fn insert(&self, record: NewAnnouncement) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO announcements (id, message, start_date, end_date, created_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&record.message)
        .bind(&record.start_date)
        .bind(&record.end_date)
        .bind(&record.created_by)
        .bind(&record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>> {
        let row = sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {ANNOUNCEMENT_COLS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_all(
        &self,
        filter: Option<&ActiveAt>,
        sort: SortOrder,
    ) -> AppResult<Vec<Announcement>> {
        let order = order_clause(sort);
        let rows = match filter {
            Some(ActiveAt(now)) => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {ANNOUNCEMENT_COLS} FROM announcements
                     WHERE (start_date IS NULL OR start_date <= $1)
                       AND end_date >= $1
                     ORDER BY {order}"
                ))
                .bind(now)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Announcement>(&format!(
                    "SELECT {ANNOUNCEMENT_COLS} FROM announcements ORDER BY {order}"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn replace_fields(&self, id: Uuid, changes: AnnouncementChanges) -> AppResult<bool> {
        let (keep_start, start_date) = match changes.start_date {
            FieldPatch::Keep => (true, None),
            FieldPatch::Set(v) => (false, Some(v)),
            FieldPatch::Unset => (false, None),
        };
        let result = sqlx::query(
            "UPDATE announcements
             SET message = $2,
                 end_date = $3,
                 start_date = CASE WHEN $4 THEN start_date ELSE $5 END
             WHERE id = $1",
        )
        .bind(id)
        .bind(&changes.message)
        .bind(&changes.end_date)
        .bind(keep_start)
        .bind(start_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unset_field(&self, id: Uuid, field: AnnouncementField) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE announcements SET {} = NULL WHERE id = $1",
            field.column()
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
