#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use todoforge::routes::{self, health};
use todoforge::store::MemoryStore;
use todoforge::{AppState, Config};

pub const TEST_SECRET: &str = "integration_test_secret";

pub fn test_config() -> Config {
    Config::from_vars(|key| match key {
        "DATABASE_URI" => Some("postgres://unused".to_string()),
        "TOKEN_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is complete")
}

pub fn test_state(store: Arc<MemoryStore>) -> web::Data<AppState> {
    web::Data::new(AppState::new(&test_config(), store))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends a request and returns the status and the parsed JSON body (`Null` if empty).
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
        })
    };
    (status, body)
}

pub async fn register(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

pub async fn login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    send(
        app,
        test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

/// Registers a fresh account and returns its token.
pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> String {
    let (status, body) = register(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);

    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body.as_str().expect("token is a JSON string").to_string()
}
