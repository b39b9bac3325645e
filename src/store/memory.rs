use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Todo, TodoPatch, User};
use crate::store::TodoStore;

/// In-process store with the same semantics as [`PgStore`](crate::store::PgStore).
///
/// Each trait call holds the lock for its whole duration, which gives the same
/// single-document atomicity the database provides.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    // Insertion order doubles as list order.
    todos: Vec<Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of todos across all users.
    pub async fn todo_count(&self) -> usize {
        self.inner.read().await.todos.len()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_todos(&self, owner_id: Uuid) -> Result<Vec<Todo>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .todos
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_todo(&self, todo: Todo) -> Result<Todo, AppError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&todo.owner_id) {
            return Err(AppError::Unauthorized(format!(
                "no user {} to own the todo",
                todo.owner_id
            )));
        }
        inner.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .map(|todo| {
                todo.apply(patch);
                todo.clone()
            }))
    }

    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Todo>, AppError> {
        let mut inner = self.inner.write().await;
        let position = inner
            .todos
            .iter()
            .position(|t| t.id == id && t.owner_id == owner_id);
        Ok(position.map(|index| inner.todos.remove(index)))
    }
}
