//! Connection state between two users.

use serde::{Deserialize, Serialize};

use crate::models::{User, UserId};

/// Where a pair of users stands.
///
/// There is no rejected state: a pending request can only be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectionState {
    None,
    Pending { from: UserId, to: UserId },
    Connected,
}

impl ConnectionState {
    /// Derive the state of the pair from both documents.
    ///
    /// Either side listing the other counts as connected, so a half-written
    /// accept still reads as `Connected`.
    pub fn between(a: &User, b: &User) -> Self {
        if a.is_connected_to(&b.id) || b.is_connected_to(&a.id) {
            ConnectionState::Connected
        } else if b.has_pending_from(&a.id) {
            ConnectionState::Pending {
                from: a.id.clone(),
                to: b.id.clone(),
            }
        } else if a.has_pending_from(&b.id) {
            ConnectionState::Pending {
                from: b.id.clone(),
                to: a.id.clone(),
            }
        } else {
            ConnectionState::None
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_the_documents() {
        let mut ada = User::new("Ada", "ada@example.com", "h");
        let mut bob = User::new("Bob", "bob@example.com", "h");
        assert_eq!(ConnectionState::between(&ada, &bob), ConnectionState::None);

        bob.pending_connections.insert(ada.id.clone());
        assert_eq!(
            ConnectionState::between(&ada, &bob),
            ConnectionState::Pending {
                from: ada.id.clone(),
                to: bob.id.clone()
            }
        );
        assert_eq!(
            ConnectionState::between(&bob, &ada),
            ConnectionState::Pending {
                from: ada.id.clone(),
                to: bob.id.clone()
            }
        );

        bob.pending_connections.remove(&ada.id);
        bob.connections_list.insert(ada.id.clone());
        assert!(ConnectionState::between(&ada, &bob).is_connected());

        ada.connections_list.insert(bob.id.clone());
        assert!(ConnectionState::between(&bob, &ada).is_connected());
    }
}
