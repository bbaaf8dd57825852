//! Admin post handlers. Every route here sits behind `auth_middleware`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::{DeletedDto, PostRequest};
use crate::interfaces::http::common::{
    api_error, ApiError, ApiResponse, PaginatedResponse, PaginationParams, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::posts::{PostDetailDto, PostSummaryDto};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "All posts including drafts", body = PaginatedResponse<PostSummaryDto>)
    )
)]
pub async fn list_all_posts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<PostSummaryDto>>, ApiError> {
    let page = state
        .editor
        .dashboard(&user.context(), params.page())
        .await
        .map_err(api_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post, published or not", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let post = state
        .editor
        .get(&user.context(), id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/posts",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostDetailDto>),
        (status = 409, description = "Slug already in use"),
        (status = 422, description = "Missing required fields or unknown category")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<PostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostDetailDto>>), ApiError> {
    let ctx = user.context();
    let created = state
        .editor
        .create(&ctx, request.into())
        .await
        .map_err(api_error)?;
    let post = state
        .editor
        .get(&ctx, created.id)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/posts/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Post not found"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<PostRequest>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let ctx = user.context();
    state
        .editor
        .update(&ctx, id, request.into())
        .await
        .map_err(api_error)?;
    let post = state.editor.get(&ctx, id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/posts/{id}/toggle-publish",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Visibility flipped", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "Post not found")
    )
)]
pub async fn toggle_publish(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let ctx = user.context();
    state
        .editor
        .toggle_published(&ctx, id)
        .await
        .map_err(api_error)?;
    let post = state.editor.get(&ctx, id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(post.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/posts/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletedDto>>, ApiError> {
    state
        .editor
        .delete(&user.context(), id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(DeletedDto { id })))
}
