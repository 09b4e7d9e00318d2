use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    db::announcements::AnnouncementStore,
    error::{AppError, AppResult},
    models::{
        announcement::{
            ActiveAt, Announcement, AnnouncementChanges, AnnouncementParams, FieldPatch,
            NewAnnouncement, SortOrder,
        },
        teacher::AuthenticatedUser,
    },
    services::{
        metrics,
        timestamps::{is_iso8601, now_iso},
    },
};

/// Announcement fields that passed validation.
#[derive(Debug)]
struct ValidatedFields {
    message: String,
    end_date: String,
    start_date: Option<String>,
}

/// Checks run, in order, before any write. An empty `start_date` counts as omitted.
fn validate(params: AnnouncementParams) -> AppResult<ValidatedFields> {
    let message = params.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidInput("Message cannot be empty".into()));
    }
    if params.end_date.is_empty() {
        return Err(AppError::InvalidInput("End date is required".into()));
    }
    if !is_iso8601(&params.end_date) {
        return Err(AppError::InvalidInput("Invalid date format".into()));
    }
    let start_date = params.start_date.filter(|s| !s.is_empty());
    if let Some(start) = &start_date {
        if !is_iso8601(start) {
            return Err(AppError::InvalidInput("Invalid date format".into()));
        }
    }

    Ok(ValidatedFields {
        message: message.to_string(),
        end_date: params.end_date,
        start_date,
    })
}

fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidInput("Invalid announcement ID".into()))
}

fn not_found() -> AppError {
    AppError::NotFound("Announcement not found".into())
}

#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }

    /// Announcements visible right now, newest first.
    pub async fn list_active(&self) -> AppResult<Vec<Announcement>> {
        self.list_active_at(&now_iso()).await
    }

    pub async fn list_active_at(&self, now: &str) -> AppResult<Vec<Announcement>> {
        self.store
            .find_all(Some(&ActiveAt(now.to_string())), SortOrder::NewestFirst)
            .await
    }

    /// Every announcement regardless of its window, newest first.
    pub async fn list_all(&self, requester: &AuthenticatedUser) -> AppResult<Vec<Announcement>> {
        tracing::debug!(username = %requester.username, "listing all announcements");
        self.store.find_all(None, SortOrder::NewestFirst).await
    }

    pub async fn create(
        &self,
        requester: &AuthenticatedUser,
        params: AnnouncementParams,
    ) -> AppResult<Uuid> {
        let result = self.try_create(requester, params).await;
        metrics::observe("create", &result);
        result
    }

    async fn try_create(
        &self,
        requester: &AuthenticatedUser,
        params: AnnouncementParams,
    ) -> AppResult<Uuid> {
        let fields = validate(params)?;
        let id = self
            .store
            .insert(NewAnnouncement {
                message: fields.message,
                start_date: fields.start_date,
                end_date: fields.end_date,
                created_by: requester.username.clone(),
                created_at: now_iso(),
            })
            .await?;

        info!(%id, created_by = %requester.username, "announcement created");
        Ok(id)
    }

    /// Replaces message and end date. An omitted `start_date` removes it from the record.
    pub async fn update(
        &self,
        requester: &AuthenticatedUser,
        id: &str,
        params: AnnouncementParams,
    ) -> AppResult<()> {
        let result = self.try_update(requester, id, params).await;
        metrics::observe("update", &result);
        result
    }

    async fn try_update(
        &self,
        requester: &AuthenticatedUser,
        id: &str,
        params: AnnouncementParams,
    ) -> AppResult<()> {
        let id = parse_id(id)?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(not_found());
        }
        let fields = validate(params)?;

        let changes = AnnouncementChanges {
            message: fields.message,
            end_date: fields.end_date,
            start_date: FieldPatch::set_or_unset(fields.start_date),
        };
        if !self.store.replace_fields(id, changes).await? {
            // Deleted between the lookup and the write.
            return Err(not_found());
        }

        info!(%id, updated_by = %requester.username, "announcement updated");
        Ok(())
    }

    pub async fn delete(&self, requester: &AuthenticatedUser, id: &str) -> AppResult<()> {
        let result = self.try_delete(requester, id).await;
        metrics::observe("delete", &result);
        result
    }

    async fn try_delete(&self, requester: &AuthenticatedUser, id: &str) -> AppResult<()> {
        let id = parse_id(id)?;
        if !self.store.delete(id).await? {
            return Err(not_found());
        }
        info!(%id, deleted_by = %requester.username, "announcement deleted");
        Ok(())
    }

    /// Round-trip to the backing store.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
