//! User profile documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IdSet, UserId};

/// Avatar assigned to profiles that never set one
pub const DEFAULT_AVATAR: &str = "👤";

/// A user profile together with its relationship fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Lower-cased, unique across users
    pub email: String,
    /// bcrypt hash; never leaves the server in responses
    pub password_hash: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    /// Cached size of `connections_list`
    #[serde(default)]
    pub connections: u32,
    /// Accepted connections; symmetric across the pair
    #[serde(default)]
    pub connections_list: IdSet<UserId>,
    /// Requests this user has received and not yet accepted
    #[serde(default)]
    pub pending_connections: IdSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

/// A position held by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Experience {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// A course of study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Education {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
}

impl User {
    /// Create a fresh profile with no relationships
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::generate(),
            name: name.into().trim().to_string(),
            email: normalize_email(&email.into()),
            password_hash: password_hash.into(),
            title: String::new(),
            location: String::new(),
            avatar: default_avatar(),
            bio: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            connections: 0,
            connections_list: IdSet::new(),
            pending_connections: IdSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bring the cached `connections` count back in line with the list
    pub fn recompute_connection_count(&mut self) {
        self.connections = self.connections_list.len() as u32;
    }

    pub fn is_connected_to(&self, other: &UserId) -> bool {
        self.connections_list.contains(other)
    }

    pub fn has_pending_from(&self, other: &UserId) -> bool {
        self.pending_connections.contains(other)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Display fields used wherever this user is referenced
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            location: self.location.clone(),
            avatar: self.avatar.clone(),
            connections: self.connections,
        }
    }
}

/// Emails are matched case-insensitively and without surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Resolved display fields for a referenced user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub title: String,
    pub location: String,
    pub avatar: String,
    pub connections: u32,
}

/// Fields a user may change on their own profile.
///
/// Relationship fields are deliberately absent; they only change through
/// the relationship manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
}

impl ProfilePatch {
    /// Apply every present field to `user`
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(title) = self.title {
            user.title = title.trim().to_string();
        }
        if let Some(location) = self.location {
            user.location = location.trim().to_string();
        }
        if let Some(avatar) = self.avatar {
            user.avatar = avatar;
        }
        if let Some(bio) = self.bio {
            user.bio = bio;
        }
        if let Some(experience) = self.experience {
            user.experience = experience;
        }
        if let Some(education) = self.education {
            user.education = education;
        }
        user.touch();
    }
}

/// Input for registering a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub title: Option<String>,
    pub location: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        let mut user = User::new(new.name, new.email, new.password_hash);
        if let Some(title) = new.title {
            user.title = title.trim().to_string();
        }
        if let Some(location) = new.location {
            user.location = location.trim().to_string();
        }
        user
    }
}
