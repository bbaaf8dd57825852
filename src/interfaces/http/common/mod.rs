//! Response envelopes, query parameters and error mapping shared by all
//! handlers

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::application::PostPage;
use crate::domain::DomainError;
use crate::shared::types::{PagerModel, RowRange};

pub use validated_json::ValidatedJson;

/// Standard response envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Page bookkeeping returned alongside every paginated list
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    /// Row window served for this page
    pub range: Option<RowRange>,
    /// Page buttons to render
    pub pager: PagerModel,
}

impl From<&PostPage> for PaginationMeta {
    fn from(page: &PostPage) -> Self {
        Self {
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
            range: page.range,
            pager: page.pager.clone(),
        }
    }
}

/// Paginated list response
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

/// `?page=` query parameter
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number; out-of-range values are clamped
    pub page: Option<u64>,
}

impl PaginationParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::Pagination(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a domain error to its HTTP status and error envelope.
///
/// Storage failures are logged and reported without detail.
pub fn api_error(err: DomainError) -> ApiError {
    let status = status_for(&err);
    let message = match err {
        DomainError::Storage(detail) => {
            error!("Storage failure: {}", detail);
            "Internal server error".to_string()
        }
        DomainError::Validation(msg)
        | DomainError::Conflict(msg)
        | DomainError::Unauthorized(msg) => msg,
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}
