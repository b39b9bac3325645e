use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Todo, TodoInput, TodoPatch, TodoView},
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

pub const UPDATED: &str = "Todo updated successfully";
pub const DELETED: &str = "Todo deleted successfully";

/// A path id that is not a UUID cannot name any todo, so it gets the same answer as a
/// missing one.
fn parse_todo_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFoundOrUnauthorized)
}

/// Lists the authenticated user's todos, oldest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `{id, text, completed}`.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn get_todos(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos: Vec<TodoView> = state
        .store
        .list_todos(user.0)
        .await?
        .into_iter()
        .map(TodoView::from)
        .collect();

    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a todo for the authenticated user. It always starts with `completed: false`.
///
/// ## Responses:
/// - `200 OK`: the created `{id, text, completed}`.
/// - `400 Bad Request`: `text` missing or not a string.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `422 Unprocessable Entity`: `text` is empty.
#[post("")]
pub async fn add_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = state
        .store
        .create_todo(Todo::new(todo_data.into_inner(), user.0))
        .await?;

    Ok(HttpResponse::Ok().json(TodoView::from(todo)))
}

/// Partially updates a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: JSON string confirmation.
/// - `404 Not Found`: no todo with this id belongs to the caller.
/// - `422 Unprocessable Entity`: `text` present but empty.
#[patch("/{id}")]
pub async fn update_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    todo_id: web::Path<String>,
    patch_data: web::Json<TodoPatch>,
) -> Result<impl Responder, AppError> {
    patch_data.validate()?;
    let id = parse_todo_id(&todo_id)?;

    state
        .store
        .update_todo(id, user.0, &patch_data)
        .await?
        .ok_or(AppError::NotFoundOrUnauthorized)?;

    Ok(HttpResponse::Ok().json(UPDATED))
}

/// Deletes a todo owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: JSON string confirmation.
/// - `404 Not Found`: no todo with this id belongs to the caller.
#[delete("/{id}")]
pub async fn delete_todo(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    todo_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_todo_id(&todo_id)?;

    state
        .store
        .delete_todo(id, user.0)
        .await?
        .ok_or(AppError::NotFoundOrUnauthorized)?;

    Ok(HttpResponse::Ok().json(DELETED))
}
