use std::sync::Arc;

use crate::{
    db::teachers::TeacherDirectory,
    error::{AppError, AppResult},
    models::teacher::AuthenticatedUser,
};

/// Resolves asserted usernames against the teacher directory.
///
/// Any existing account is accepted whatever its role; the directory entry
/// is the whole of the access check.
#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn TeacherDirectory>,
}

impl AuthService {
    pub fn new(directory: Arc<dyn TeacherDirectory>) -> Self {
        Self { directory }
    }

    pub async fn authorize(&self, identity: Option<&str>) -> AppResult<AuthenticatedUser> {
        let username = identity
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("Authentication required".into()))?;

        let teacher = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("Invalid user".into()))?;

        Ok(teacher.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory::MemoryStore, models::teacher::Teacher};

    fn service() -> AuthService {
        let store = MemoryStore::with_teachers([
            Teacher {
                username: "alice".into(),
                display_name: "Alice".into(),
                role: "teacher".into(),
            },
            Teacher {
                username: "janitor".into(),
                display_name: "J. Itor".into(),
                role: "staff".into(),
            },
        ]);
        AuthService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_missing_identity() {
        let auth = service();
        for identity in [None, Some("")] {
            match auth.authorize(identity).await {
                Err(AppError::Unauthenticated(msg)) => assert_eq!(msg, "Authentication required"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_identity() {
        match service().authorize(Some("mallory")).await {
            Err(AppError::Unauthenticated(msg)) => assert_eq!(msg, "Invalid user"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_any_role_is_accepted() {
        let auth = service();
        let user = auth.authorize(Some("alice")).await.unwrap();
        assert_eq!(user.display_name, "Alice");

        let user = auth.authorize(Some("janitor")).await.unwrap();
        assert_eq!(user.role, "staff");
    }
}
