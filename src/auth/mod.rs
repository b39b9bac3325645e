pub mod extractors;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use gate::authenticate;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenCodec, TokenError};

/// Represents the payload for a user login request.
///
/// No field rules: a login that fails any check must end in the same
/// `InvalidCredentials` response as a wrong password.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}
