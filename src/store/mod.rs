//! Persistence for users and todos.
//!
//! Handlers only see the [`TodoStore`] trait. Every todo operation takes the caller's id and
//! filters on it inside the store, so a todo owned by someone else behaves exactly like one
//! that does not exist. Update and delete are single find-and-modify calls; there is never a
//! separate ownership read before the write.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Todo, TodoPatch, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts a user. Fails with `AppError::Conflict` when the email is already taken.
    async fn create_user(&self, user: User) -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// All todos of `owner_id` in insertion order.
    async fn list_todos(&self, owner_id: Uuid) -> Result<Vec<Todo>, AppError>;

    /// Inserts a todo. Fails with `AppError::Unauthorized` when `todo.owner_id` names no user.
    async fn create_todo(&self, todo: Todo) -> Result<Todo, AppError>;

    /// Applies `patch` to the todo matching both `id` and `owner_id`.
    /// Returns `None` when no such todo exists.
    async fn update_todo(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError>;

    /// Removes the todo matching both `id` and `owner_id` and returns it.
    /// Returns `None` when no such todo exists.
    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Todo>, AppError>;
}
