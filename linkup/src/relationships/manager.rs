//! Connection request lifecycle between users

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::ConnectionState;
use crate::config::{AcceptMode, RelationshipConfig};
use crate::core::resolve::resolve_summaries;
use crate::models::{User, UserId, UserSummary};
use crate::storage::UserStore;
use crate::{LinkupError, Result};

/// Drives `None -> Pending -> Connected` for pairs of users.
///
/// Both sides of a pair live in separate user documents. How the two writes
/// of an accept are persisted depends on [`AcceptMode`].
#[derive(Debug, Clone)]
pub struct RelationshipManager {
    users: Arc<dyn UserStore>,
    config: RelationshipConfig,
}

impl RelationshipManager {
    pub fn new(users: Arc<dyn UserStore>, config: RelationshipConfig) -> Self {
        Self { users, config }
    }

    pub fn config(&self) -> &RelationshipConfig {
        &self.config
    }

    async fn load(&self, id: &UserId) -> Result<User> {
        self.users
            .get_user(id)
            .await?
            .ok_or_else(|| LinkupError::NotFound("User not found".to_string()))
    }

    /// Ask `target` to connect with `actor`.
    ///
    /// Only the target's document changes: the request is recorded in its
    /// `pending_connections`.
    pub async fn send_request(&self, actor: &UserId, target: &UserId) -> Result<ConnectionState> {
        if actor == target {
            return Err(LinkupError::InvalidOperation(
                "Cannot connect to yourself".to_string(),
            ));
        }

        let mut target_user = self.load(target).await?;

        if target_user.is_connected_to(actor) {
            return Err(LinkupError::Conflict("Already connected".to_string()));
        }
        if target_user.has_pending_from(actor) {
            return Err(LinkupError::Conflict(
                "Connection request already sent".to_string(),
            ));
        }

        target_user.pending_connections.insert(actor.clone());
        target_user.touch();
        self.users.update_user(target_user).await?;

        debug!(from = %actor, to = %target, "Connection request sent");
        Ok(ConnectionState::Pending {
            from: actor.clone(),
            to: target.clone(),
        })
    }

    /// Accept the pending request `requester` sent to `actor`.
    ///
    /// In [`AcceptMode::Sequential`] the actor's document is written first and
    /// the requester's second, as two independent writes. If the second one
    /// fails the pair is left asymmetric until [`Self::repair_connections`]
    /// runs for the actor. [`AcceptMode::Transactional`] commits both
    /// documents together.
    ///
    /// Only the actor's pending set is cleared. If both users had asked each
    /// other, the actor stays in the requester's `pending_connections` next to
    /// the new connection until [`Self::repair_connections`] runs for the
    /// requester.
    pub async fn accept_request(&self, actor: &UserId, requester: &UserId) -> Result<ConnectionState> {
        let mut requester_user = self.load(requester).await?;
        let mut actor_user = self.load(actor).await?;

        if !actor_user.has_pending_from(requester) {
            return Err(LinkupError::InvalidOperation(
                "No pending connection request from this user".to_string(),
            ));
        }

        actor_user.pending_connections.remove(requester);
        actor_user.connections_list.insert(requester.clone());
        actor_user.recompute_connection_count();
        actor_user.touch();

        requester_user.connections_list.insert(actor.clone());
        requester_user.recompute_connection_count();
        requester_user.touch();

        match self.config.accept_mode {
            AcceptMode::Sequential => {
                self.users.update_user(actor_user).await?;
                if let Err(e) = self.users.update_user(requester_user).await {
                    warn!(
                        actor = %actor,
                        requester = %requester,
                        error = %e,
                        "Accept persisted for one side only; connection pair is asymmetric"
                    );
                    return Err(e.into());
                }
            }
            AcceptMode::Transactional => {
                self.users
                    .update_user_pair(actor_user, requester_user)
                    .await?;
            }
        }

        info!(actor = %actor, requester = %requester, "Connection accepted");
        Ok(ConnectionState::Connected)
    }

    /// Accepted connections of `target`, resolved to display fields
    pub async fn list_connections(&self, target: &UserId) -> Result<Vec<UserSummary>> {
        if self.config.repair_on_read {
            self.repair_connections(target).await?;
        }

        let user = self.load(target).await?;
        resolve_summaries(self.users.as_ref(), &user.connections_list.to_vec()).await
    }

    /// Incoming requests `actor` has not accepted yet
    pub async fn pending_requests(&self, actor: &UserId) -> Result<Vec<UserSummary>> {
        let user = self.load(actor).await?;
        resolve_summaries(self.users.as_ref(), &user.pending_connections.to_vec()).await
    }

    /// Users `actor` is not yet linked to, in store order.
    ///
    /// People who sent the actor a request are excluded. People the actor
    /// sent a request to are not, since outgoing requests are only recorded
    /// on the target's document.
    pub async fn suggest(&self, actor: &UserId) -> Result<Vec<UserSummary>> {
        let user = self.load(actor).await?;

        let mut exclude = Vec::with_capacity(1 + user.connections_list.len() + user.pending_connections.len());
        exclude.push(user.id.clone());
        exclude.extend(user.connections_list.iter().cloned());
        exclude.extend(user.pending_connections.iter().cloned());

        let suggestions = self
            .users
            .list_users_excluding(&exclude, self.config.suggestion_limit)
            .await?;

        Ok(suggestions.iter().map(User::summary).collect())
    }

    /// Restore symmetry for every connection `user` holds.
    ///
    /// Each counterpart that exists but does not list `user` back gets the
    /// missing entry, loses any stale pending request from `user` and has its
    /// count recomputed. On `user` itself, pending ids that are already
    /// connections are dropped and the cached count is recomputed. Returns
    /// how many documents were written; running it twice writes nothing the
    /// second time.
    pub async fn repair_connections(&self, user: &UserId) -> Result<usize> {
        let mut owner = self.load(user).await?;
        let mut repaired = 0;

        let stale: Vec<UserId> = owner
            .pending_connections
            .iter()
            .filter(|id| owner.connections_list.contains(id))
            .cloned()
            .collect();
        let count_drifted = owner.connections as usize != owner.connections_list.len();

        if !stale.is_empty() || count_drifted {
            for id in &stale {
                owner.pending_connections.remove(id);
            }
            owner.recompute_connection_count();
            owner.touch();
            owner = self.users.update_user(owner).await?;
            repaired += 1;
        }

        let counterparts = self
            .users
            .get_users(&owner.connections_list.to_vec())
            .await?;

        for mut other in counterparts {
            if other.is_connected_to(&owner.id) {
                continue;
            }
            other.connections_list.insert(owner.id.clone());
            other.pending_connections.remove(&owner.id);
            other.recompute_connection_count();
            other.touch();
            debug!(user = %owner.id, counterpart = %other.id, "Repairing one-sided connection");
            self.users.update_user(other).await?;
            repaired += 1;
        }

        if repaired > 0 {
            info!(user = %owner.id, repaired, "Repaired connections");
        }
        Ok(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;
    use crate::profiles::ProfileService;
    use crate::storage::{BaseStore, InMemoryStore, StorageError};
    use async_trait::async_trait;
    use mockall::{Sequence, mock};
    use std::sync::Mutex;

    async fn register(store: &Arc<InMemoryStore>, name: &str) -> User {
        ProfileService::new(store.clone())
            .register(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "hash".to_string(),
                title: None,
                location: None,
            })
            .await
            .unwrap()
    }

    fn manager(store: &Arc<InMemoryStore>, mode: AcceptMode) -> RelationshipManager {
        RelationshipManager::new(
            store.clone(),
            RelationshipConfig {
                accept_mode: mode,
                ..Default::default()
            },
        )
    }

    async fn fetch(store: &Arc<InMemoryStore>, id: &UserId) -> User {
        store.get_user(id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn send_then_accept_connects_both_sides() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        let state = relationships.send_request(&ada.id, &bob.id).await.unwrap();
        assert_eq!(
            state,
            ConnectionState::Pending {
                from: ada.id.clone(),
                to: bob.id.clone()
            }
        );
        // Only the target records the request
        assert!(fetch(&store, &ada.id).await.pending_connections.is_empty());

        let state = relationships.accept_request(&bob.id, &ada.id).await.unwrap();
        assert_eq!(state, ConnectionState::Connected);

        let ada = fetch(&store, &ada.id).await;
        let bob = fetch(&store, &bob.id).await;
        assert!(ada.is_connected_to(&bob.id));
        assert!(bob.is_connected_to(&ada.id));
        assert_eq!(ada.connections, 1);
        assert_eq!(bob.connections, 1);
        assert!(ada.pending_connections.is_empty());
        assert!(bob.pending_connections.is_empty());
    }

    #[tokio::test]
    async fn cannot_connect_to_yourself() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let err = manager(&store, AcceptMode::Sequential)
            .send_request(&ada.id, &ada.id)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkupError::InvalidOperation(msg) if msg == "Cannot connect to yourself"));
    }

    #[tokio::test]
    async fn duplicate_request_and_request_after_connecting_conflict() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        relationships.send_request(&ada.id, &bob.id).await.unwrap();
        let err = relationships.send_request(&ada.id, &bob.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::Conflict(msg) if msg == "Connection request already sent"));
        assert_eq!(fetch(&store, &bob.id).await.pending_connections.len(), 1);

        relationships.accept_request(&bob.id, &ada.id).await.unwrap();
        let err = relationships.send_request(&ada.id, &bob.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::Conflict(msg) if msg == "Already connected"));
    }

    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let relationships = manager(&store, AcceptMode::Sequential);
        let ghost = UserId::from("ghost");

        assert!(matches!(
            relationships.send_request(&ada.id, &ghost).await,
            Err(LinkupError::NotFound(_))
        ));
        assert!(matches!(
            relationships.accept_request(&ada.id, &ghost).await,
            Err(LinkupError::NotFound(_))
        ));
        assert!(matches!(
            relationships.list_connections(&ghost).await,
            Err(LinkupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn accept_requires_an_incoming_request() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        let err = relationships.accept_request(&bob.id, &ada.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::InvalidOperation(_)));

        // The sender cannot accept their own request
        relationships.send_request(&ada.id, &bob.id).await.unwrap();
        let err = relationships.accept_request(&ada.id, &bob.id).await.unwrap_err();
        assert!(matches!(
            err,
            LinkupError::InvalidOperation(msg) if msg == "No pending connection request from this user"
        ));
    }

    #[tokio::test]
    async fn transactional_accept_connects_both_sides() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Transactional);

        relationships.send_request(&ada.id, &bob.id).await.unwrap();
        relationships.accept_request(&bob.id, &ada.id).await.unwrap();

        let ada = fetch(&store, &ada.id).await;
        let bob = fetch(&store, &bob.id).await;
        assert!(ConnectionState::between(&ada, &bob).is_connected());
        assert_eq!((ada.connections, bob.connections), (1, 1));
    }

    #[tokio::test]
    async fn listing_resolves_connections() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        relationships.send_request(&ada.id, &bob.id).await.unwrap();
        assert_eq!(relationships.pending_requests(&bob.id).await.unwrap()[0].id, ada.id);

        relationships.accept_request(&bob.id, &ada.id).await.unwrap();
        let connections = relationships.list_connections(&bob.id).await.unwrap();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].name, "Ada");
        assert_eq!(connections[0].connections, 1);
        assert!(relationships.pending_requests(&bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn suggestions_skip_self_connections_and_requesters() {
        let store = Arc::new(InMemoryStore::new());
        let carol = register(&store, "Carol").await;
        let dave = register(&store, "Dave").await;
        let erin = register(&store, "Erin").await;
        let frank = register(&store, "Frank").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        relationships.send_request(&dave.id, &carol.id).await.unwrap();
        relationships.send_request(&erin.id, &carol.id).await.unwrap();
        relationships.accept_request(&carol.id, &erin.id).await.unwrap();

        let suggestions = relationships.suggest(&carol.id).await.unwrap();
        let ids: Vec<_> = suggestions.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![frank.id]);
    }

    #[tokio::test]
    async fn suggestions_respect_the_limit() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        for name in ["B", "C", "D", "E"] {
            register(&store, name).await;
        }
        let relationships = RelationshipManager::new(
            store.clone(),
            RelationshipConfig {
                suggestion_limit: 2,
                ..Default::default()
            },
        );
        assert_eq!(relationships.suggest(&ada.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn repair_restores_symmetry_and_is_idempotent() {
        let store = Arc::new(InMemoryStore::new());
        let mut ada = register(&store, "Ada").await;
        let mut bob = register(&store, "Bob").await;

        // One-sided connection with stale requests on both documents
        bob.pending_connections.insert(ada.id.clone());
        ada.connections_list.insert(bob.id.clone());
        ada.pending_connections.insert(bob.id.clone());
        ada.recompute_connection_count();
        store.update_user(ada.clone()).await.unwrap();
        store.update_user(bob.clone()).await.unwrap();

        let relationships = manager(&store, AcceptMode::Sequential);
        assert_eq!(relationships.repair_connections(&ada.id).await.unwrap(), 2);
        assert_eq!(relationships.repair_connections(&ada.id).await.unwrap(), 0);

        let ada = fetch(&store, &ada.id).await;
        let bob = fetch(&store, &bob.id).await;
        assert!(bob.is_connected_to(&ada.id));
        assert!(bob.pending_connections.is_empty());
        assert!(ada.pending_connections.is_empty());
        assert_eq!((ada.connections, bob.connections), (1, 1));
    }

    #[tokio::test]
    async fn repair_on_read_fixes_before_listing() {
        let store = Arc::new(InMemoryStore::new());
        let mut ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        ada.connections_list.insert(bob.id.clone());
        ada.recompute_connection_count();
        store.update_user(ada.clone()).await.unwrap();

        let relationships = RelationshipManager::new(
            store.clone(),
            RelationshipConfig {
                repair_on_read: true,
                ..Default::default()
            },
        );
        let listed = relationships.list_connections(&ada.id).await.unwrap();
        assert_eq!(listed[0].connections, 1);
        assert!(fetch(&store, &bob.id).await.is_connected_to(&ada.id));
    }

    #[tokio::test]
    async fn repair_leaves_deleted_counterparts_alone() {
        let store = Arc::new(InMemoryStore::new());
        let mut ada = register(&store, "Ada").await;
        ada.connections_list.insert(UserId::from("deleted"));
        ada.recompute_connection_count();
        store.update_user(ada.clone()).await.unwrap();

        let relationships = manager(&store, AcceptMode::Sequential);
        assert_eq!(relationships.repair_connections(&ada.id).await.unwrap(), 0);
        assert_eq!(fetch(&store, &ada.id).await.connections, 1);
    }

    #[tokio::test]
    async fn mutual_requests_leave_a_reverse_pending_entry_until_repair() {
        let store = Arc::new(InMemoryStore::new());
        let ada = register(&store, "Ada").await;
        let bob = register(&store, "Bob").await;
        let relationships = manager(&store, AcceptMode::Sequential);

        relationships.send_request(&ada.id, &bob.id).await.unwrap();
        relationships.send_request(&bob.id, &ada.id).await.unwrap();
        relationships.accept_request(&ada.id, &bob.id).await.unwrap();

        let bob_doc = fetch(&store, &bob.id).await;
        assert!(bob_doc.is_connected_to(&ada.id));
        assert!(bob_doc.pending_connections.contains(&ada.id));

        assert_eq!(relationships.repair_connections(&bob.id).await.unwrap(), 1);
        let bob_doc = fetch(&store, &bob.id).await;
        assert!(bob_doc.pending_connections.is_empty());
        assert_eq!(bob_doc.connections, 1);
    }

    mock! {
        pub Users {}

        #[async_trait]
        impl BaseStore for Users {
            async fn health_check(&self) -> std::result::Result<bool, StorageError>;
            async fn clear(&self) -> std::result::Result<(), StorageError>;
            async fn get_metadata(&self) -> std::result::Result<serde_json::Value, StorageError>;
            async fn close(&self) -> std::result::Result<(), StorageError>;
        }

        #[async_trait]
        impl UserStore for Users {
            async fn create_user(&self, user: User) -> std::result::Result<User, StorageError>;
            async fn get_user(&self, id: &UserId) -> std::result::Result<Option<User>, StorageError>;
            async fn get_users(&self, ids: &[UserId]) -> std::result::Result<Vec<User>, StorageError>;
            async fn find_user_by_email(&self, email: &str) -> std::result::Result<Option<User>, StorageError>;
            async fn update_user(&self, user: User) -> std::result::Result<User, StorageError>;
            async fn update_user_pair(&self, first: User, second: User) -> std::result::Result<(User, User), StorageError>;
            async fn list_users(&self, limit: Option<usize>, offset: Option<usize>) -> std::result::Result<Vec<User>, StorageError>;
            async fn list_users_excluding(&self, exclude: &[UserId], limit: usize) -> std::result::Result<Vec<User>, StorageError>;
        }
    }

    impl std::fmt::Debug for MockUsers {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockUsers").finish_non_exhaustive()
        }
    }

    /// Ada has asked Bob to connect
    fn pending_pair() -> (User, User) {
        let ada = User::new("Ada", "ada@example.com", "h");
        let mut bob = User::new("Bob", "bob@example.com", "h");
        bob.pending_connections.insert(ada.id.clone());
        (ada, bob)
    }

    fn expect_lookups(mock: &mut MockUsers, users: &[User]) {
        let users = users.to_vec();
        mock.expect_get_user()
            .returning(move |id| Ok(users.iter().find(|u| &u.id == id).cloned()));
    }

    #[tokio::test]
    async fn sequential_accept_with_failing_second_write_is_asymmetric() {
        let (ada, bob) = pending_pair();
        let written = Arc::new(Mutex::new(Vec::<User>::new()));

        let mut mock = MockUsers::new();
        expect_lookups(&mut mock, &[ada.clone(), bob.clone()]);

        let mut seq = Sequence::new();
        let log = written.clone();
        let bob_id = bob.id.clone();
        mock.expect_update_user()
            .withf(move |u| u.id == bob_id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |u| {
                log.lock().unwrap().push(u.clone());
                Ok(u)
            });
        let ada_id = ada.id.clone();
        mock.expect_update_user()
            .withf(move |u| u.id == ada_id)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StorageError::Connection("connection reset".to_string())));
        mock.expect_update_user_pair().never();

        let relationships = RelationshipManager::new(Arc::new(mock), RelationshipConfig::default());
        let err = relationships.accept_request(&bob.id, &ada.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::Storage(_)));

        // Bob's side landed, Ada's did not
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        let bob_after = &written[0];
        assert!(bob_after.is_connected_to(&ada.id));
        assert!(!ada.is_connected_to(&bob.id));
        assert!(ConnectionState::between(&ada, bob_after).is_connected());
    }

    #[tokio::test]
    async fn transactional_accept_with_failing_commit_writes_nothing() {
        let (ada, bob) = pending_pair();

        let mut mock = MockUsers::new();
        expect_lookups(&mut mock, &[ada.clone(), bob.clone()]);
        mock.expect_update_user().never();
        mock.expect_update_user_pair()
            .times(1)
            .returning(|_, _| Err(StorageError::Transaction("commit failed".to_string())));

        let relationships = RelationshipManager::new(
            Arc::new(mock),
            RelationshipConfig {
                accept_mode: AcceptMode::Transactional,
                ..Default::default()
            },
        );
        let err = relationships.accept_request(&bob.id, &ada.id).await.unwrap_err();
        assert!(matches!(err, LinkupError::Storage(_)));
    }

    #[tokio::test]
    async fn transactional_accept_hands_both_documents_to_the_store() {
        let (ada, bob) = pending_pair();

        let mut mock = MockUsers::new();
        expect_lookups(&mut mock, &[ada.clone(), bob.clone()]);
        let (ada_id, bob_id) = (ada.id.clone(), bob.id.clone());
        mock.expect_update_user_pair()
            .withf(move |first, second| {
                first.id == bob_id
                    && first.is_connected_to(&ada_id)
                    && first.pending_connections.is_empty()
                    && second.is_connected_to(&bob_id)
                    && first.connections == 1
                    && second.connections == 1
            })
            .times(1)
            .returning(|first, second| Ok((first, second)));

        let relationships = RelationshipManager::new(
            Arc::new(mock),
            RelationshipConfig {
                accept_mode: AcceptMode::Transactional,
                ..Default::default()
            },
        );
        assert!(relationships.accept_request(&bob.id, &ada.id).await.unwrap().is_connected());
    }
}
