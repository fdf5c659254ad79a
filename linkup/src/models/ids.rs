//! Strongly typed document identifiers.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the string representation of the identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a user account
    UserId
);
define_id!(
    /// Identity of a post
    PostId
);
define_id!(
    /// Identity of a comment within a post
    CommentId
);
define_id!(
    /// Identity of a job listing
    JobId
);
define_id!(
    /// Identity of a direct message
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = PostId::from("post-1");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("post-1"));
        let back: PostId = serde_json::from_str("\"post-1\"").unwrap();
        assert_eq!(back, id);
    }
}
