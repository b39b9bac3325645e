pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the user and todo endpoints.
///
/// `/users` is public; everything under `/todos` goes through `AuthMiddleware`.
/// Body deserialization failures are reported through `AppError::BadRequest`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/users")
            .service(users::register)
            .service(users::login),
    )
    .service(
        web::scope("/todos")
            .wrap(AuthMiddleware)
            .service(todos::get_todos)
            .service(todos::add_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
