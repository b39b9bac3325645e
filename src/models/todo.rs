use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a todo as stored in the `todos` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Todo {
    /// Unique identifier (UUID v4).
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    /// The user this todo belongs to. Every query filters on it.
    pub owner_id: Uuid,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
}

/// The shape of a todo on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text,
            completed: todo.completed,
        }
    }
}

/// Body of `POST /todos`.
///
/// Unknown fields such as `completed` are ignored; a new todo always starts incomplete.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Body of `PATCH /todos/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct TodoPatch {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    /// Creates a new, incomplete todo owned by `owner_id`.
    pub fn new(input: TodoInput, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: input.text,
            completed: false,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Applies the fields present in `patch`.
    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}
