//! Connection requests and accepted connections between users.
//!
//! A pair of users is either unrelated, has one pending request, or is
//! connected. Requests are recorded on the receiving user's document and
//! connections on both.

pub mod manager;
pub mod state;

pub use manager::RelationshipManager;
pub use state::ConnectionState;
