use axum::extract::{Path, Query, State};
use axum::Json;

use super::dto::CategoryPostsDto;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, PaginationMeta, PaginationParams};
use crate::interfaces::http::modules::posts::{summaries, CategoryDto};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories by name", body = ApiResponse<Vec<CategoryDto>>)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.blog.categories().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{slug}/posts",
    tag = "Categories",
    params(
        ("slug" = String, Path, description = "Category slug"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Category with a page of its published posts", body = ApiResponse<CategoryPostsDto>),
        (status = 404, description = "Unknown category")
    )
)]
pub async fn category_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<CategoryPostsDto>>, ApiError> {
    let (category, page) = state
        .blog
        .category_posts(&slug, params.page())
        .await
        .map_err(api_error)?;

    let pagination = PaginationMeta::from(&page);
    Ok(Json(ApiResponse::success(CategoryPostsDto {
        category: category.into(),
        posts: summaries(page.items),
        pagination,
    })))
}
