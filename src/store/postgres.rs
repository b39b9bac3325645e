use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Todo, TodoPatch, User};
use crate::store::TodoStore;

const TODO_COLUMNS: &str = "id, text, completed, owner_id, created_at";
const USER_COLUMNS: &str = "id, email, password_hash, created_at";

/// PostgreSQL-backed store. The pool is shared by every request.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_uri)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn create_user(&self, user: User) -> Result<User, AppError> {
        let result = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email, password_hash, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::Conflict("Email already registered".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_todos(&self, owner_id: Uuid) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE owner_id = $1 ORDER BY seq",
            TODO_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn create_todo(&self, todo: Todo) -> Result<Todo, AppError> {
        let owner_id = todo.owner_id;
        let result = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (id, text, completed, owner_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(todo.id)
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.owner_id)
        .bind(todo.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(todo) => Ok(todo),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => Err(
                AppError::Unauthorized(format!("no user {} to own the todo", owner_id)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_todo(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        // Ownership is part of the WHERE clause, so check and write happen in one statement.
        let updated = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET text = COALESCE($3, text), completed = COALESCE($4, completed)
             WHERE id = $1 AND owner_id = $2
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .bind(patch.text.as_deref())
        .bind(patch.completed)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Todo>, AppError> {
        let deleted = sqlx::query_as::<_, Todo>(&format!(
            "DELETE FROM todos WHERE id = $1 AND owner_id = $2 RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(deleted)
    }
}
