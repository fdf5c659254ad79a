//! Authentication for the Linkup API
//!
//! Tokens are optional at the router level: a valid bearer token attaches an
//! [`AuthContext`] to the request, a malformed or expired one is rejected.
//! Handlers that need a signed-in user take an [`Actor`].

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use linkup::models::{User, UserId};
use linkup::storage::UserStore;

use crate::{error::ServerError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email at the time of issue
    pub email: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

/// Identity carried by a validated token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub email: String,
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(auth_header) = headers.typed_get::<Authorization<Bearer>>() {
        let auth_context = validate_jwt_token(auth_header.token(), &state.config.jwt_secret)?;
        tracing::debug!(user = %auth_context.user_id, "Authenticated request");
        request.extensions_mut().insert(auth_context);
    }

    Ok(next.run(request).await)
}

/// Validate a JWT token and return the authentication context
fn validate_jwt_token(token: &str, secret: &str) -> Result<AuthContext, ServerError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        ServerError::Auth("Not authorized, token failed".to_string())
    })?;

    Ok(AuthContext {
        user_id: UserId::from(token_data.claims.sub),
        email: token_data.claims.email,
    })
}

/// Generate a JWT token for a user
pub fn generate_jwt_token(
    user: &User,
    secret: &str,
    expiration_hours: u64,
) -> Result<(String, i64), ServerError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = now + (expiration_hours * 3600) as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok((token, exp as i64))
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServerError> {
    bcrypt::hash(password, cost)
        .map_err(|e| ServerError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServerError> {
    bcrypt::verify(password, hash)
        .map_err(|e| ServerError::Internal(format!("Failed to verify password: {}", e)))
}

/// The signed-in user making the request.
///
/// Rejects with 401 when the request carries no token or the token's user
/// no longer exists.
#[derive(Debug, Clone)]
pub struct Actor(pub User);

impl Actor {
    pub fn id(&self) -> &UserId {
        &self.0.id
    }
}

impl FromRequestParts<Arc<AppState>> for Actor {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authorized, no token".to_string()))?;

        let user = state
            .network
            .storage()
            .get_user(&context.user_id)
            .await
            .map_err(linkup::LinkupError::from)?
            .ok_or_else(|| ServerError::Auth("Not authorized, user not found".to_string()))?;

        Ok(Actor(user))
    }
}
