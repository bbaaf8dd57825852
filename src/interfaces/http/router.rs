//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, PaginatedResponse, PaginationMeta, PaginationParams};
use super::middleware::auth_middleware;
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{admin, auth, categories, health, newsletter, posts, search};
use super::state::AppState;
use crate::shared::types::{PagerModel, RowRange};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        posts::list_posts,
        posts::featured_posts,
        posts::recent_posts,
        posts::get_post,
        categories::list_categories,
        categories::category_posts,
        search::search_posts,
        newsletter::subscribe,
        auth::signup,
        auth::login,
        auth::current_user,
        admin::list_all_posts,
        admin::get_post,
        admin::create_post,
        admin::update_post,
        admin::toggle_publish,
        admin::delete_post,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<posts::PostSummaryDto>,
            PaginationMeta,
            PaginationParams,
            PagerModel,
            RowRange,
            health::HealthResponse,
            health::ComponentHealth,
            posts::CategoryDto,
            posts::PostSummaryDto,
            posts::PostDetailDto,
            categories::CategoryPostsDto,
            newsletter::SubscribeRequest,
            newsletter::SubscriptionDto,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            admin::PostRequest,
            admin::DeletedDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Posts", description = "Published posts: feed, featured, recent, by slug"),
        (name = "Categories", description = "Categories and their posts"),
        (name = "Search", description = "Full-text search over published posts"),
        (name = "Newsletter", description = "Newsletter sign-up"),
        (name = "Authentication", description = "Editor sign-up, login (JWT) and profile"),
        (name = "Admin", description = "Post management for signed-in editors"),
    ),
    info(
        title = "MoneyFeast Blog API",
        version = "1.0.0",
        description = "Public blog API and editor CMS for MoneyFeast",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Routes under `/api/v1`, before state is attached.
fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/featured", get(posts::featured_posts))
        .route("/posts/recent", get(posts::recent_posts))
        .route("/posts/{slug}", get(posts::get_post))
        .route("/categories", get(categories::list_categories))
        .route("/categories/{slug}/posts", get(categories::category_posts))
        .route("/search", get(search::search_posts))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        .route("/auth/me", get(auth::current_user))
        .route(
            "/admin/posts",
            get(admin::list_all_posts).post(admin::create_post),
        )
        .route(
            "/admin/posts/{id}",
            get(admin::get_post)
                .put(admin::update_post)
                .delete(admin::delete_post),
        )
        .route(
            "/admin/posts/{id}/toggle-publish",
            post(admin::toggle_publish),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    public.merge(protected)
}

/// Create the API router with all routes.
///
/// `/metrics` is mounted only when a Prometheus recorder handle is given.
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .nest("/api/v1", api_routes(&state))
        .route("/health", get(health::health_check))
        .with_state(state)
        .merge(swagger_routes);

    if let Some(handle) = metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::infrastructure::database::{connect_and_migrate, DatabaseConfig};

    async fn app() -> Router {
        let db = connect_and_migrate(&DatabaseConfig::memory()).await.unwrap();
        let config = AppConfig::default();
        let state = AppState::new(db, &config);
        state.accounts.bootstrap_admin(&config.admin).await.unwrap();
        create_api_router(state, None)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn login(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = call(
            app,
            request(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(app: &Router) -> String {
        let admin = AppConfig::default().admin;
        login(app, &admin.email, &admin.password).await
    }

    async fn create_post(app: &Router, token: &str, title: &str, published: bool) -> Value {
        let (status, body) = call(
            app,
            request(
                "POST",
                "/api/v1/admin/posts",
                Some(token),
                Some(json!({
                    "title": title,
                    "excerpt": "Money matters",
                    "content": "## Body",
                    "category_id": 1,
                    "published": published,
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }

    #[tokio::test]
    async fn health_echoes_request_id() {
        let app = app().await;
        let req = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn categories_are_seeded() {
        let app = app().await;
        let (status, body) = call(&app, request("GET", "/api/v1/categories", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Business", "Lifestyle", "Wealth"]);
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let app = app().await;
        let (status, body) = call(&app, request("GET", "/api/v1/admin/posts", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = call(
            &app,
            request("GET", "/api/v1/auth/me", Some("not-a-jwt"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn feed_is_paginated_with_pager() {
        let app = app().await;
        let token = admin_token(&app).await;
        for n in 1..=12 {
            create_post(&app, &token, &format!("Wealth Tip {}", n), true).await;
        }
        create_post(&app, &token, "Unfinished Draft", false).await;

        let (status, body) = call(&app, request("GET", "/api/v1/posts?page=2", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let meta = &body["pagination"];
        assert_eq!(meta["total"], 12);
        assert_eq!(meta["per_page"], 9);
        assert_eq!(meta["total_pages"], 2);
        assert_eq!(meta["range"], json!({ "offset": 9, "limit": 9 }));
        assert_eq!(meta["pager"]["visible_pages"], json!([1, 2]));
        assert_eq!(meta["pager"]["has_next"], false);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (_, body) = call(&app, request("GET", "/api/v1/posts?page=50", None, None)).await;
        assert_eq!(body["pagination"]["page"], 2);

        let (_, body) = call(&app, request("GET", "/api/v1/admin/posts", Some(&token), None)).await;
        assert_eq!(body["pagination"]["total"], 13);
    }

    #[tokio::test]
    async fn drafts_appear_after_toggle() {
        let app = app().await;
        let token = admin_token(&app).await;
        let post = create_post(&app, &token, "Quiet Launch", false).await;
        assert_eq!(post["slug"], "quiet-launch");
        assert_eq!(post["author"], "Admin");
        assert_eq!(post["category"]["slug"], "wealth");

        let (status, _) = call(&app, request("GET", "/api/v1/posts/quiet-launch", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/v1/admin/posts/{}/toggle-publish", post["id"]);
        let (status, body) = call(&app, request("POST", &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["published"], true);

        let (status, body) = call(&app, request("GET", "/api/v1/posts/quiet-launch", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["content"], "## Body");
    }

    #[tokio::test]
    async fn create_reports_missing_fields_and_duplicates() {
        let app = app().await;
        let token = admin_token(&app).await;

        let (status, body) = call(
            &app,
            request(
                "POST",
                "/api/v1/admin/posts",
                Some(&token),
                Some(json!({ "title": " ", "category_id": 1 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Please fill in all required fields");

        create_post(&app, &token, "Same Title", true).await;
        let (status, _) = call(
            &app,
            request(
                "POST",
                "/api/v1/admin/posts",
                Some(&token),
                Some(json!({ "title": "Same Title", "category_id": 1 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn signed_up_editor_can_delete() {
        let app = app().await;
        let admin = admin_token(&app).await;
        let post = create_post(&app, &admin, "Keep Me", true).await;

        let (status, body) = call(
            &app,
            request(
                "POST",
                "/api/v1/auth/signup",
                None,
                Some(json!({
                    "email": "writer@moneyfeast.io",
                    "password": "hunter22",
                    "display_name": "Writer"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["role"], "editor");

        let editor = login(&app, "writer@moneyfeast.io", "hunter22").await;
        let (_, me) = call(&app, request("GET", "/api/v1/auth/me", Some(&editor), None)).await;
        assert_eq!(me["data"]["display_name"], "Writer");

        let uri = format!("/api/v1/admin/posts/{}", post["id"]);
        let (status, body) = call(&app, request("DELETE", &uri, Some(&editor), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], post["id"]);

        let (status, _) = call(&app, request("GET", "/api/v1/posts/keep-me", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, request("DELETE", &uri, Some(&admin), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn newsletter_rejects_duplicates() {
        let app = app().await;
        let subscribe = |email: &str| {
            request(
                "POST",
                "/api/v1/newsletter/subscribe",
                None,
                Some(json!({ "email": email })),
            )
        };

        let (status, body) = call(&app, subscribe("Reader@Example.com")).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["email"], "reader@example.com");

        let (status, body) = call(&app, subscribe("reader@example.com")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "This email is already subscribed!");

        let (status, _) = call(&app, subscribe("nope")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn blank_search_is_empty() {
        let app = app().await;
        let token = admin_token(&app).await;
        create_post(&app, &token, "Crypto Volatility", true).await;

        let (status, body) = call(&app, request("GET", "/api/v1/search?q=%20%20", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["total"], 0);
        assert_eq!(body["pagination"]["range"], Value::Null);

        let (_, body) = call(&app, request("GET", "/api/v1/search?q=crypto", None, None)).await;
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["data"][0]["slug"], "crypto-volatility");
    }
}
