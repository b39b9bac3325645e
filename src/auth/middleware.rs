use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::gate::authenticate;
use crate::error::AppError;
use crate::state::AppState;

/// Rejects requests without a valid bearer token before they reach a handler.
///
/// On success the subject id is stored in request extensions as [`AuthenticatedUser`].
/// On failure the request is answered with the uniform 401 and the wrapped service is
/// never called.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<AppState>>() {
            Some(state) => authenticate(req.headers(), &state.tokens),
            None => {
                log::error!("AppState is not registered; cannot authenticate {}", req.path());
                Err(AppError::Unauthorized("application state missing".into()))
            }
        };

        match outcome {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUser(user_id));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                let response = req.into_response(app_err.error_response().map_into_right_body());
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
