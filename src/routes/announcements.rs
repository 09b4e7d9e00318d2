use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{
        announcement::{Announcement, AnnouncementParams},
        teacher::AuthenticatedUser,
    },
    AppState,
};

/// GET /announcements/ : public, announcements whose window contains now.
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Announcement>>> {
    state.announcements.list_active().await.map(Json)
}

/// GET /announcements/manage?username=
pub async fn list_all(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Announcement>>> {
    state.announcements.list_all(&user).await.map(Json)
}

/// POST /announcements/?message=&end_date=&start_date=&username=
pub async fn create_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    params: Result<Query<AnnouncementParams>, QueryRejection>,
) -> AppResult<Json<Value>> {
    let Query(params) = params?;
    let id = state.announcements.create(&user, params).await?;
    Ok(Json(json!({
        "id": id.to_string(),
        "message": "Announcement created successfully",
    })))
}

/// PUT /announcements/{id}?message=&end_date=&start_date=&username=
pub async fn update_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    params: Result<Query<AnnouncementParams>, QueryRejection>,
) -> AppResult<Json<Value>> {
    let Query(params) = params?;
    state.announcements.update(&user, &id, params).await?;
    Ok(Json(json!({ "message": "Announcement updated successfully" })))
}

/// DELETE /announcements/{id}?username=
pub async fn delete_announcement(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    state.announcements.delete(&user, &id).await?;
    Ok(Json(json!({ "message": "Announcement deleted successfully" })))
}
