//! Authentication endpoints for user signup and login

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use linkup::LinkupError;

use crate::{
    api::auth::Actor,
    api::auth_service::Session,
    api::dto::{ApiResponse, AuthResponse, LoginRequest, SignupRequest, UserDto},
    error::{ServerError, ServerResult},
    state::AppState,
};

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            success: true,
            token: session.token,
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

/// User signup endpoint
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    summary = "Register a new user account",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid request data or email already registered"),
        (status = 403, description = "Signup disabled"),
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    if !state.config.allow_signup {
        return Err(LinkupError::Forbidden("User signup is disabled".to_string()).into());
    }

    let session = state.auth.signup(&state.network, request).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// User login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    summary = "Authenticate user and get JWT token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let session = state.auth.login(&state.network, request).await?;
    Ok(Json(session.into()))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Signed-in profile", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn me(actor: Actor) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::data(actor.0.into()))
}
