use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::InfrastructureError;
use crate::user::errors::UserError;

/// User store backed by the `users` table.
///
/// Email uniqueness is enforced by the `users_email_key` constraint, so
/// concurrent registrations of one address cannot both succeed.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
        })
    }
}

fn store_error(e: sqlx::Error) -> UserError {
    InfrastructureError::StoreUnavailable(e.to_string()).into()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, refresh_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, refresh_token, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn save(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, refresh_token, created_at
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::AlreadyRegistered(user.email.to_string());
                }
            }
            store_error(e)
        })?;

        User::try_from(row)
    }

    async fn save_refresh_token(&self, id: &UserId, token: &str) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(InfrastructureError::StoreUnavailable(format!(
                "no row for user {}",
                id
            ))
            .into());
        }

        Ok(())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, refresh_token, created_at
            FROM users
            WHERE refresh_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?
        .map(User::try_from)
        .transpose()
    }
}
