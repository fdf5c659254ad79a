//! Profile and connection endpoints

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{Path, Query, State},
    response::Json,
};

use linkup::models::UserId;

use crate::{
    api::auth::Actor,
    api::dto::{
        ApiResponse, PaginationParams, StatusResponse, UpdateProfileRequest, UserDto,
        UserSummaryDto,
    },
    error::ServerResult,
    state::AppState,
};

fn summary_list(list: Vec<linkup::models::UserSummary>) -> ApiResponse<Vec<UserSummaryDto>> {
    ApiResponse::list(list.into_iter().map(Into::into).collect())
}

/// List users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Users, oldest account first", body = ApiResponse<Vec<UserDto>>)
    )
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> ServerResult<Json<ApiResponse<Vec<UserDto>>>> {
    let users = state
        .network
        .profiles()
        .list(params.limit, params.offset)
        .await?;
    Ok(Json(ApiResponse::list(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// People the caller may want to connect with
#[utoipa::path(
    get,
    path = "/api/users/suggestions",
    tag = "users",
    responses(
        (status = 200, description = "Users not yet connected or pending", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    actor: Actor,
) -> ServerResult<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let suggested = state.network.relationships().suggest(actor.id()).await?;
    Ok(Json(summary_list(suggested)))
}

/// Incoming connection requests
#[utoipa::path(
    get,
    path = "/api/users/pending",
    tag = "users",
    responses(
        (status = 200, description = "Users waiting for the caller to accept", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn pending_requests(
    State(state): State<Arc<AppState>>,
    actor: Actor,
) -> ServerResult<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let pending = state
        .network
        .relationships()
        .pending_requests(actor.id())
        .await?;
    Ok(Json(summary_list(pending)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<UserDto>>> {
    let user = state.network.profiles().get(&UserId::from(id)).await?;
    Ok(Json(ApiResponse::data(user.into())))
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the caller's profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<UpdateProfileRequest>,
) -> ServerResult<Json<ApiResponse<UserDto>>> {
    let user = state
        .network
        .profiles()
        .update_profile(actor.id(), &UserId::from(id), request.into())
        .await?;
    Ok(Json(ApiResponse::data(user.into())))
}

/// A user's accepted connections
#[utoipa::path(
    get,
    path = "/api/users/{id}/connections",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Resolved connections", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_connections(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let connections = state
        .network
        .relationships()
        .list_connections(&UserId::from(id))
        .await?;
    Ok(Json(summary_list(connections)))
}

/// Send a connection request to `{id}`
#[utoipa::path(
    post,
    path = "/api/users/{id}/connect",
    tag = "users",
    params(("id" = String, Path, description = "User to connect with")),
    responses(
        (status = 200, description = "Connection request sent", body = StatusResponse),
        (status = 400, description = "Self, already connected or already requested"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn send_connection_request(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state
        .network
        .relationships()
        .send_request(actor.id(), &UserId::from(id))
        .await?;
    Ok(Json(StatusResponse::ok("Connection request sent")))
}

/// Accept the pending request from `{id}`
#[utoipa::path(
    put,
    path = "/api/users/{id}/accept",
    tag = "users",
    params(("id" = String, Path, description = "User who sent the request")),
    responses(
        (status = 200, description = "Connection request accepted", body = StatusResponse),
        (status = 400, description = "No pending request from this user"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn accept_connection_request(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state
        .network
        .relationships()
        .accept_request(actor.id(), &UserId::from(id))
        .await?;
    Ok(Json(StatusResponse::ok("Connection request accepted")))
}
