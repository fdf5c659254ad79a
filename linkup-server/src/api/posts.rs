//! Post endpoints, including likes, comments and shares

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use linkup::models::PostId;

use crate::{
    api::auth::Actor,
    api::dto::{
        ApiResponse, CommentRequest, CreatePostRequest, PaginationParams, PostDto,
        StatusResponse, UpdatePostRequest,
    },
    error::{ServerError, ServerResult},
    state::AppState,
};

/// List posts, newest first
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PaginationParams),
    responses(
        (status = 200, description = "Posts with users resolved", body = ApiResponse<Vec<PostDto>>)
    )
)]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> ServerResult<Json<ApiResponse<Vec<PostDto>>>> {
    let posts = state
        .network
        .posts()
        .list(params.limit, params.offset)
        .await?;
    Ok(Json(ApiResponse::list(
        posts.into_iter().map(PostDto::from).collect(),
    )))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = ApiResponse<PostDto>),
        (status = 400, description = "Post content is required"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    JsonExtractor(request): JsonExtractor<CreatePostRequest>,
) -> ServerResult<(StatusCode, Json<ApiResponse<PostDto>>)> {
    let post = state
        .network
        .posts()
        .create(actor.id(), &request.content, request.image)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(post.into()).with_message("Post created successfully")),
    ))
}

/// Get a post by ID
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = ApiResponse<PostDto>),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<PostDto>>> {
    let post = state.network.posts().get(&PostId::from(id)).await?;
    Ok(Json(ApiResponse::data(post.into())))
}

/// Edit a post; author only
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<PostDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<UpdatePostRequest>,
) -> ServerResult<Json<ApiResponse<PostDto>>> {
    let post = state
        .network
        .posts()
        .update(actor.id(), &PostId::from(id), request.into())
        .await?;
    Ok(Json(ApiResponse::data(post.into())))
}

/// Delete a post; author only
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted successfully", body = StatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<StatusResponse>> {
    state
        .network
        .posts()
        .delete(actor.id(), &PostId::from(id))
        .await?;
    Ok(Json(StatusResponse::ok("Post deleted successfully")))
}

/// Like a post, or remove the caller's like
#[utoipa::path(
    put,
    path = "/api/posts/{id}/like",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<PostDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn like_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<PostDto>>> {
    let post = state
        .network
        .engagement()
        .toggle_like(&PostId::from(id), actor.id())
        .await?;
    Ok(Json(ApiResponse::data(post.into())))
}

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment added; returns the updated post", body = ApiResponse<PostDto>),
        (status = 400, description = "Comment content is required"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
    JsonExtractor(request): JsonExtractor<CommentRequest>,
) -> ServerResult<Json<ApiResponse<PostDto>>> {
    if request.content.trim().is_empty() {
        return Err(ServerError::Validation("Comment content is required".to_string()));
    }

    let post = state
        .network
        .engagement()
        .add_comment(&PostId::from(id), actor.id(), &request.content)
        .await?;
    Ok(Json(ApiResponse::data(post.into())))
}

/// Share a post; sharing twice has no further effect
#[utoipa::path(
    put,
    path = "/api/posts/{id}/share",
    tag = "posts",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post shared", body = ApiResponse<PostDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn share_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<PostDto>>> {
    let post = state
        .network
        .engagement()
        .share_post(&PostId::from(id), actor.id())
        .await?;
    Ok(Json(ApiResponse::data(post.into())))
}
