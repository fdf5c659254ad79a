//! Account signup and login on top of the profile service

use linkup::core::NetworkManager;
use linkup::models::{NewUser, User};

use crate::{
    api::auth::{generate_jwt_token, hash_password, verify_password},
    api::dto::{LoginRequest, SignupRequest},
    config::ServerConfig,
    error::{ServerError, ServerResult, bad_request},
};

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A signed-in user with a fresh token
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub expires_at: i64,
    pub user: User,
}

/// Authentication service
#[derive(Debug)]
pub struct AuthService {
    jwt_secret: String,
    jwt_expiration_hours: u64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiration_hours: config.jwt_expiration_hours,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Register an account and sign it in
    pub async fn signup(&self, network: &NetworkManager, request: SignupRequest) -> ServerResult<Session> {
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(bad_request("Password must be at least 6 characters"));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = network
            .profiles()
            .register(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                title: request.title,
                location: request.location,
            })
            .await?;

        self.session_for(user)
    }

    /// Check credentials and issue a token
    pub async fn login(&self, network: &NetworkManager, request: LoginRequest) -> ServerResult<Session> {
        let user = network
            .profiles()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ServerError::Auth("Invalid credentials".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::debug!(user = %user.id, "Password mismatch");
            return Err(ServerError::Auth("Invalid credentials".to_string()));
        }

        self.session_for(user)
    }

    fn session_for(&self, user: User) -> ServerResult<Session> {
        let (token, expires_at) =
            generate_jwt_token(&user, &self.jwt_secret, self.jwt_expiration_hours)?;
        tracing::info!(user = %user.id, "Issued session token");
        Ok(Session {
            token,
            expires_at,
            user,
        })
    }
}
