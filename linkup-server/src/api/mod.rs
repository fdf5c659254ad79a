//! API implementation for the Linkup HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Json,
    routing::{get, post, put},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use linkup::storage::NetworkStore;

use crate::state::AppState;

pub mod auth;
pub mod auth_endpoints;
pub mod auth_service;
pub mod dto;
pub mod jobs;
pub mod messages;
pub mod posts;
pub mod users;

use auth::auth_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_endpoints::signup,
        auth_endpoints::login,
        auth_endpoints::me,
        users::list_users,
        users::suggestions,
        users::pending_requests,
        users::get_user,
        users::update_user,
        users::get_connections,
        users::send_connection_request,
        users::accept_connection_request,
        posts::list_posts,
        posts::create_post,
        posts::get_post,
        posts::update_post,
        posts::delete_post,
        posts::like_post,
        posts::add_comment,
        posts::share_post,
        jobs::list_jobs,
        jobs::create_job,
        jobs::get_job,
        jobs::update_job,
        jobs::delete_job,
        jobs::apply_to_job,
        messages::conversations,
        messages::thread,
        messages::send_message,
        messages::mark_as_read,
        health_check,
    ),
    components(
        schemas(
            dto::SignupRequest,
            dto::LoginRequest,
            dto::AuthResponse,
            dto::UserDto,
            dto::UserSummaryDto,
            dto::UpdateProfileRequest,
            dto::PostDto,
            dto::CommentDto,
            dto::CreatePostRequest,
            dto::UpdatePostRequest,
            dto::CommentRequest,
            dto::JobDto,
            dto::CreateJobRequest,
            dto::UpdateJobRequest,
            dto::MessageDto,
            dto::ConversationDto,
            dto::SendMessageRequest,
            dto::StatusResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and the current user"),
        (name = "users", description = "Profiles, connection requests and suggestions"),
        (name = "posts", description = "Posts with likes, comments and shares"),
        (name = "jobs", description = "Job listings and applications"),
        (name = "messages", description = "Direct messages"),
        (name = "health", description = "Service health"),
    ),
    info(
        title = "Linkup API",
        version = "1.0.0",
        description = "JSON API for a professional network: profiles, connections, posts, jobs and messages.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        // Authentication endpoints
        .route("/auth/signup", post(auth_endpoints::signup))
        .route("/auth/login", post(auth_endpoints::login))
        .route("/auth/me", get(auth_endpoints::me))
        // Profile and connection endpoints
        .route("/users", get(users::list_users))
        .route("/users/suggestions", get(users::suggestions))
        .route("/users/pending", get(users::pending_requests))
        .route("/users/{id}", get(users::get_user).put(users::update_user))
        .route("/users/{id}/connections", get(users::get_connections))
        .route("/users/{id}/connect", post(users::send_connection_request))
        .route("/users/{id}/accept", put(users::accept_connection_request))
        // Post endpoints
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{id}/like", put(posts::like_post))
        .route("/posts/{id}/comments", post(posts::add_comment))
        .route("/posts/{id}/share", put(posts::share_post))
        // Job endpoints
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route(
            "/jobs/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/jobs/{id}/apply", post(jobs::apply_to_job))
        // Message endpoints
        .route(
            "/messages",
            get(messages::conversations).post(messages::send_message),
        )
        .route("/messages/{id}", get(messages::thread))
        .route("/messages/{id}/read", put(messages::mark_as_read))
        .route("/health", get(health_check))
        // Attach the caller's identity when a bearer token is present
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state);

    // Main router with API prefix and documentation
    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = serde_json::Value)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let storage_ok = match state.network.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };

    Json(serde_json::json!({
        "status": if storage_ok { "OK" } else { "DEGRADED" },
        "version": linkup::VERSION,
        "storage": {
            "backend": state.network.storage().backend_name(),
            "healthy": storage_ok,
        },
        "accept_mode": state.network.config().relationships.accept_mode,
        "signup": state.config.allow_signup,
    }))
}
