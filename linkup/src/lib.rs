//! # Linkup
//!
//! Core library for a professional-network backend: profiles, connection
//! requests, posts with likes/comments/shares, job listings with applicants,
//! and direct messages, persisted through pluggable document stores.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkup::prelude::*;
//!
//! async fn example() -> Result<()> {
//!     let config = ConfigBuilder::testing().build()?;
//!     let network = linkup::init(config).await?;
//!
//!     let ada = network.profiles().register(NewUser {
//!         name: "Ada".into(),
//!         email: "ada@example.com".into(),
//!         password_hash: "<bcrypt hash>".into(),
//!         title: None,
//!         location: None,
//!     }).await?;
//!     let bob = network.profiles().register(NewUser {
//!         name: "Bob".into(),
//!         email: "bob@example.com".into(),
//!         password_hash: "<bcrypt hash>".into(),
//!         title: None,
//!         location: None,
//!     }).await?;
//!
//!     network.relationships().send_request(&ada.id, &bob.id).await?;
//!     network.relationships().accept_request(&bob.id, &ada.id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Relationship manager**: the pending-request / connection lifecycle
//! - **Engagement aggregator**: likes, comments, shares and job applications
//! - **Content, profile and messaging services**: ownership-checked CRUD
//! - **Storage**: `UserStore`, `PostStore`, `JobStore` and `MessageStore`
//!   traits with SurrealDB and in-memory backends

pub mod config;
pub mod content;
pub mod core;
pub mod engagement;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod profiles;
pub mod relationships;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::init;

    pub use crate::config::{
        AcceptMode, ConfigBuilder, ConfigLoader, LinkupConfig, LogFormat, LogLevel,
        RelationshipConfig,
    };

    pub use crate::models::{
        Comment, Conversation, Job, JobId, JobPatch, JobType, JobView, Message, MessageId,
        MessageView, NewJob, NewUser, Post, PostId, PostPatch, PostView, ProfilePatch, User,
        UserId, UserSummary,
    };

    pub use crate::content::{JobService, PostService};
    pub use crate::core::NetworkManager;
    pub use crate::engagement::{EngagementAggregator, Owned, ensure_owner};
    pub use crate::messaging::MessageService;
    pub use crate::profiles::ProfileService;
    pub use crate::relationships::{ConnectionState, RelationshipManager};

    pub use crate::storage::{JobFilter, NetworkStore, StorageError};

    pub use crate::{LinkupError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Linkup operations
#[derive(Debug, thiserror::Error)]
pub enum LinkupError {
    /// A referenced document does not exist
    #[error("{0}")]
    NotFound(String),

    /// The actor does not own the document it tried to change
    #[error("{0}")]
    Forbidden(String),

    /// The change would duplicate existing state
    #[error("{0}")]
    Conflict(String),

    /// The transition is not allowed from the current state
    #[error("{0}")]
    InvalidOperation(String),

    /// Input failed a presence or shape check
    #[error("{0}")]
    Validation(String),

    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for LinkupError {
    fn from(err: crate::config::ConfigError) -> Self {
        LinkupError::Configuration(err.to_string())
    }
}

/// Result type for Linkup operations
pub type Result<T> = std::result::Result<T, LinkupError>;

/// Initialize Linkup with default configuration
///
/// Loads `linkup.toml` (or yaml/json) from the usual locations and
/// `LINKUP_*` environment variables on top of the defaults.
pub async fn init_with_defaults() -> Result<core::NetworkManager> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(config).await
}

/// Initialize Linkup with the provided configuration
///
/// Sets up logging, opens the configured storage backend and returns a
/// [`core::NetworkManager`] wired to it.
pub async fn init(config: config::LinkupConfig) -> Result<core::NetworkManager> {
    // Ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let storage = storage::create_storage_service(&config).await?;
    tracing::info!(backend = storage.backend_name(), "Linkup storage ready");

    Ok(core::NetworkManager::new(storage, config))
}
