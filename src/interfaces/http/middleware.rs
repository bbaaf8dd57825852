//! Bearer-token authentication middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::EditorContext;
use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authentication token",
            AuthError::InvalidToken => "Invalid authentication token",
            AuthError::ExpiredToken => "Token has expired",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

/// State needed to verify tokens
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Signed-in account, inserted into request extensions by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// `None` when the token carries a role this service does not know.
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            role: UserRole::parse(&claims.role)?,
            user_id: claims.sub,
            email: claims.email,
            display_name: claims.display_name,
        })
    }

    /// Context handed to editor operations.
    pub fn context(&self) -> EditorContext {
        EditorContext::new(
            self.user_id.clone(),
            self.email.clone(),
            self.display_name.clone(),
            self.role,
        )
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(request: &Request<Body>, config: &JwtConfig) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = extract_token(auth_header).ok_or(AuthError::InvalidToken)?;
    let claims = verify_token(token, config).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;
    if claims.is_expired() {
        return Err(AuthError::ExpiredToken);
    }
    AuthenticatedUser::from_claims(claims).ok_or(AuthError::InvalidToken)
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&request, &auth_state.jwt_config) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(?err, path = %request.uri().path(), "Rejected request");
            err.into_response()
        }
    }
}
