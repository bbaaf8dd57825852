//! Full-text search over published posts

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::interfaces::http::common::{api_error, ApiError, PaginatedResponse};
use crate::interfaces::http::modules::posts::PostSummaryDto;
use crate::interfaces::http::state::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Text matched against title, excerpt and content
    pub q: Option<String>,
    pub page: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "Search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching published posts; empty for a blank query", body = PaginatedResponse<PostSummaryDto>)
    )
)]
pub async fn search_posts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PaginatedResponse<PostSummaryDto>>, ApiError> {
    let query = params.q.as_deref().unwrap_or_default();
    let page = params.page.unwrap_or(1).max(1);

    metrics::counter!("blog_search_requests_total").increment(1);
    let results = state.blog.search(query, page).await.map_err(api_error)?;
    Ok(Json(results.into()))
}
