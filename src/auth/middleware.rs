use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::error::AppError;
use crate::AppState;

/// Authentication guard for protected routes.
///
/// Per request: reads the `Authorization: Bearer <token>` header (401 when
/// missing or malformed), verifies the token (401 on any failure), then
/// resolves the claim's subject to a live user record (404 when the user no
/// longer exists). On success the hashless `User` is inserted into the request
/// extensions for handlers to pick up via `CurrentUser`.
pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".into()))?
                .to_string();

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::Internal("application state not configured".into()))?
                .clone();

            let claims = state.tokens.verify(&token)?;

            // The token may outlive its user (stateless verification, no
            // revocation), so the claim is resolved against the store.
            let user = state
                .users
                .find_by_id(claims.sub)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::NotFound("User not found".into()))?;

            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}
