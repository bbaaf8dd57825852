//! Authentication API handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    let user = state
        .accounts
        .sign_up(
            &request.email,
            &request.password,
            request.display_name.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let session = state
        .accounts
        .sign_in(&request.email, &request.password)
        .await
        .map_err(api_error)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: session.token,
        token_type: session.token_type,
        expires_in: session.expires_in,
        user: session.user.into(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signed-in account", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let account = state
        .accounts
        .find_user(&user.user_id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(account.into())))
}
