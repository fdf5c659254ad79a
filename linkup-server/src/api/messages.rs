//! Direct message endpoints. Every route requires a signed-in user.

use std::sync::Arc;

use axum::{
    Json as JsonExtractor,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use linkup::models::{MessageId, UserId};

use crate::{
    api::auth::Actor,
    api::dto::{ApiResponse, ConversationDto, MessageDto, SendMessageRequest},
    error::{ServerError, ServerResult},
    state::AppState,
};

/// The caller's conversations, most recent first
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses(
        (status = 200, description = "One entry per partner", body = ApiResponse<Vec<ConversationDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn conversations(
    State(state): State<Arc<AppState>>,
    actor: Actor,
) -> ServerResult<Json<ApiResponse<Vec<ConversationDto>>>> {
    let conversations = state.network.messages().conversations(actor.id()).await?;
    Ok(Json(ApiResponse::list(
        conversations.into_iter().map(ConversationDto::from).collect(),
    )))
}

/// Messages exchanged with user `{id}`, oldest first
#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    tag = "messages",
    params(("id" = String, Path, description = "Partner user ID")),
    responses(
        (status = 200, description = "Thread; incoming messages are marked read afterwards", body = ApiResponse<Vec<MessageDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn thread(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<Vec<MessageDto>>>> {
    let messages = state
        .network
        .messages()
        .thread(actor.id(), &UserId::from(id))
        .await?;
    Ok(Json(ApiResponse::list(
        messages.into_iter().map(MessageDto::from).collect(),
    )))
}

/// Send a message
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<MessageDto>),
        (status = 400, description = "Please provide receiver and content"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Receiver not found")
    )
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    JsonExtractor(request): JsonExtractor<SendMessageRequest>,
) -> ServerResult<(StatusCode, Json<ApiResponse<MessageDto>>)> {
    let (Some(receiver), Some(content)) = (
        request.receiver_id.filter(|r| !r.trim().is_empty()),
        request.content,
    ) else {
        return Err(ServerError::Validation(
            "Please provide receiver and content".to_string(),
        ));
    };

    let message = state
        .network
        .messages()
        .send(actor.id(), &UserId::from(receiver), &content)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(message.into()))))
}

/// Mark one received message as read
#[utoipa::path(
    put,
    path = "/api/messages/{id}/read",
    tag = "messages",
    params(("id" = String, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = ApiResponse<MessageDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the receiver"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_as_read(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Path(id): Path<String>,
) -> ServerResult<Json<ApiResponse<MessageDto>>> {
    let message = state
        .network
        .messages()
        .mark_as_read(actor.id(), &MessageId::from(id))
        .await?;
    Ok(Json(ApiResponse::data(message.into())))
}
