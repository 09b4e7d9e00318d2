use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::{announcements::AnnouncementStore, teachers::TeacherDirectory},
    error::AppResult,
    models::{
        announcement::{
            ActiveAt, Announcement, AnnouncementChanges, AnnouncementField, NewAnnouncement,
            SortOrder,
        },
        teacher::Teacher,
    },
};

/// Process-local store backing both the announcement collection and the
/// teacher directory. Records are kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    announcements: RwLock<Vec<Announcement>>,
    teachers: RwLock<HashMap<String, Teacher>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teachers(teachers: impl IntoIterator<Item = Teacher>) -> Self {
        let teachers = teachers
            .into_iter()
            .map(|t| (t.username.clone(), t))
            .collect();
        Self {
            announcements: RwLock::default(),
            teachers: RwLock::new(teachers),
        }
    }

    pub async fn add_teacher(&self, teacher: Teacher) {
        self.teachers
            .write()
            .await
            .insert(teacher.username.clone(), teacher);
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn insert(&self, record: NewAnnouncement) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        self.announcements.write().await.push(Announcement {
            id,
            message: record.message,
            start_date: record.start_date,
            end_date: record.end_date,
            created_by: record.created_by,
            created_at: record.created_at,
        });
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Announcement>> {
        let rows = self.announcements.read().await;
        Ok(rows.iter().find(|a| a.id == id).cloned())
    }

    async fn find_all(
        &self,
        filter: Option<&ActiveAt>,
        sort: SortOrder,
    ) -> AppResult<Vec<Announcement>> {
        let mut rows: Vec<Announcement> = {
            let all = self.announcements.read().await;
            all.iter()
                .filter(|a| filter.map_or(true, |ActiveAt(now)| a.is_active(now)))
                .cloned()
                .collect()
        };
        // sort_by is stable: equal timestamps stay in insertion order.
        match sort {
            SortOrder::NewestFirst => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::OldestFirst => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        Ok(rows)
    }

    async fn replace_fields(&self, id: Uuid, changes: AnnouncementChanges) -> AppResult<bool> {
        let mut rows = self.announcements.write().await;
        let Some(row) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        row.message = changes.message;
        row.end_date = changes.end_date;
        changes.start_date.apply(&mut row.start_date);
        Ok(true)
    }

    async fn unset_field(&self, id: Uuid, field: AnnouncementField) -> AppResult<bool> {
        let mut rows = self.announcements.write().await;
        let Some(row) = rows.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        match field {
            AnnouncementField::StartDate => row.start_date = None,
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.announcements.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl TeacherDirectory for MemoryStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Teacher>> {
        Ok(self.teachers.read().await.get(username).cloned())
    }
}
