#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "Domain models, the store abstraction, password hashing, token signing, the bearer"]
#![doc = "auth gate, route configuration and error handling for the to-do API."]
#![doc = "The binary (`main.rs`) loads configuration, connects the store and serves the app."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
