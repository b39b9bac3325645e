use crate::{
    auth::{LoginRequest, RegisterRequest},
    error::AppError,
    models::{NewUser, User},
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

pub const REGISTERED: &str = "User registered successfully";

/// Register a new user
///
/// Hashes the password on the blocking pool and stores the account.
///
/// ## Responses:
/// - `200 OK`: JSON string confirmation.
/// - `400 Bad Request`: body is not `{email, password}` strings.
/// - `409 Conflict`: the email is already registered.
/// - `422 Unprocessable Entity`: an empty field.
#[post("")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let RegisterRequest { email, password } = register_data.into_inner();

    let hasher = state.passwords;
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    let user = state
        .store
        .create_user(User::new(NewUser {
            email,
            password_hash,
        }))
        .await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Ok().json(REGISTERED))
}

/// Login user
///
/// Returns a signed token as a JSON string. An unknown email and a wrong password produce
/// the same `401 Invalid credentials` response, and both pay for one bcrypt round.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let LoginRequest { email, password } = login_data.into_inner();

    let user = state.store.find_user_by_email(&email).await?;

    let hasher = state.passwords;
    let digest = user.as_ref().map(|u| u.password_hash.clone());
    let verified = web::block(move || match digest {
        Some(digest) => hasher.verify(&password, &digest),
        None => hasher.verify_missing(&password),
    })
    .await?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            log::debug!("Login failed: wrong password for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }
        None => {
            log::debug!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = state.tokens.sign(user.id)?;
    Ok(HttpResponse::Ok().json(token))
}
