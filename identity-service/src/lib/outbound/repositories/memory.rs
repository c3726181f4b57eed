use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::InfrastructureError;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Used when no database is configured and by the HTTP tests. The email
/// check and the insert in `save` happen under one write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::AlreadyRegistered(user.email.to_string()));
        }

        let stored = User {
            id: UserId::new(),
            email: user.email,
            password_hash: user.password_hash,
            refresh_token: None,
            created_at: user.created_at,
        };
        users.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn save_refresh_token(&self, id: &UserId, token: &str) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        let user = users.get_mut(id).ok_or_else(|| {
            InfrastructureError::StoreUnavailable(format!("no row for user {}", id))
        })?;
        user.refresh_token = Some(token.to_string());

        Ok(())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.refresh_token.as_deref() == Some(token))
            .cloned())
    }
}
