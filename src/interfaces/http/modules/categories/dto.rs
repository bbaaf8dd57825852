use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::common::PaginationMeta;
use crate::interfaces::http::modules::posts::{CategoryDto, PostSummaryDto};

/// A category page: the category and one page of its posts
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPostsDto {
    pub category: CategoryDto,
    pub posts: Vec<PostSummaryDto>,
    pub pagination: PaginationMeta,
}
