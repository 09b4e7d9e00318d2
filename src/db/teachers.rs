use async_trait::async_trait;
use sqlx::PgPool;

use crate::{error::AppResult, models::teacher::Teacher};

/// Lookup of the identities allowed to manage announcements.
#[async_trait]
pub trait TeacherDirectory: Send + Sync {
    /// Exact-match lookup by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>>;
}

#[derive(Clone)]
pub struct PgTeacherDirectory {
    pool: PgPool,
}

impl PgTeacherDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or refresh a directory entry.
    pub async fn upsert(&self, teacher: &Teacher) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO teachers (username, display_name, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (username) DO UPDATE
             SET display_name = EXCLUDED.display_name,
                 role = EXCLUDED.role",
        )
        .bind(&teacher.username)
        .bind(&teacher.display_name)
        .bind(&teacher.role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TeacherDirectory for PgTeacherDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>> {
        let row = sqlx::query_as::<_, Teacher>(
            "SELECT username, display_name, role FROM teachers WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

/// Accounts provisioned by `seed-demo` and by the in-memory backend.
pub fn demo_teachers() -> Vec<Teacher> {
    [
        ("mrodriguez", "Ms. Rodriguez", "teacher"),
        ("mchen", "Mr. Chen", "teacher"),
        ("principal", "Principal Martinez", "admin"),
    ]
    .into_iter()
    .map(|(username, display_name, role)| Teacher {
        username: username.into(),
        display_name: display_name.into(),
        role: role.into(),
    })
    .collect()
}
