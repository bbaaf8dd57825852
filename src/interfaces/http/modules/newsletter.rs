//! Newsletter subscription endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(length(min = 1, max = 254, message = "email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscriptionDto {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

#[utoipa::path(
    post,
    path = "/api/v1/newsletter/subscribe",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse<SubscriptionDto>),
        (status = 409, description = "This email is already subscribed!"),
        (status = 422, description = "Invalid email address")
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubscriptionDto>>), ApiError> {
    let subscriber = state
        .newsletter
        .subscribe(&request.email)
        .await
        .map_err(api_error)?;

    metrics::counter!("newsletter_subscriptions_total").increment(1);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SubscriptionDto {
            email: subscriber.email,
            subscribed_at: subscriber.subscribed_at,
        })),
    ))
}
