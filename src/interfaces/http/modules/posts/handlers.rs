//! Public post handlers

use axum::extract::{Path, Query, State};
use axum::Json;

use super::dto::{summaries, PostDetailDto, PostSummaryDto};
use crate::interfaces::http::common::{
    api_error, ApiError, ApiResponse, PaginatedResponse, PaginationParams,
};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    params(PaginationParams),
    responses(
        (status = 200, description = "Published posts, newest first", body = PaginatedResponse<PostSummaryDto>)
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<PostSummaryDto>>, ApiError> {
    let page = state
        .blog
        .list_published(params.page())
        .await
        .map_err(api_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/featured",
    tag = "Posts",
    responses(
        (status = 200, description = "Newest featured posts", body = ApiResponse<Vec<PostSummaryDto>>)
    )
)]
pub async fn featured_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PostSummaryDto>>>, ApiError> {
    let posts = state.blog.featured().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(summaries(posts))))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/recent",
    tag = "Posts",
    responses(
        (status = 200, description = "Newest non-featured posts", body = ApiResponse<Vec<PostSummaryDto>>)
    )
)]
pub async fn recent_posts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PostSummaryDto>>>, ApiError> {
    let posts = state.blog.recent().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(summaries(posts))))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    tag = "Posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Published post", body = ApiResponse<PostDetailDto>),
        (status = 404, description = "No published post with this slug")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<PostDetailDto>>, ApiError> {
    let post = state.blog.post_by_slug(&slug).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(post.into())))
}
