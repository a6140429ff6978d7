use axum::{
    body::Body,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::common::UserId;
use crate::domains::auth::JwtService;
use crate::server::error::ApiError;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// JWT authentication middleware
///
/// Reads the token from the `access_token` cookie (browser clients) or the
/// Authorization header, verifies it, and adds AuthUser to request
/// extensions. If no token or invalid token, request continues without
/// AuthUser (public access); protected routes reject via [`require_auth`].
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!("Authenticated user: {}", user.user_id);
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Gate for protected routes: 401 before the handler runs unless
/// [`jwt_auth_middleware`] attached an identity.
pub async fn require_auth(request: Request<Body>, next: Next) -> Response {
    if request.extensions().get::<AuthUser>().is_none() {
        return ApiError::Unauthorized("Unauthorized".to_string()).into_response();
    }
    next.run(request).await
}

/// Extract and verify a JWT token from the request
fn extract_auth_user(request: &Request<Body>, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = token_from_cookie(request).or_else(|| token_from_authorization(request))?;

    let claims = jwt_service.verify_token(&token).ok()?;

    Some(AuthUser {
        user_id: UserId::from_uuid(claims.user_id),
    })
}

/// The `access_token` cookie set by the auth service at sign-in.
fn token_from_cookie(request: &Request<Body>) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == "access_token" && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Authorization header fallback (handle both "Bearer <token>" and raw token).
fn token_from_authorization(request: &Request<Body>) -> Option<String> {
    let auth_str = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);
    Some(token.to_string())
}
