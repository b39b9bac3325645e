use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account as stored in the `users` table.
///
/// Never serialized: the password digest must not leave the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        }
    }
}
