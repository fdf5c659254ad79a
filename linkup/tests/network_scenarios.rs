//! End-to-end scenarios over the in-memory backend
//!
//! Each test wires a full `NetworkManager` and drives it the way the HTTP
//! layer does.

use std::sync::Arc;

use linkup::prelude::*;
use linkup::storage::InMemoryStore;

fn network(mode: AcceptMode) -> NetworkManager {
    let config = ConfigBuilder::testing()
        .with_accept_mode(mode)
        .build()
        .unwrap();
    NetworkManager::new(Arc::new(InMemoryStore::new()), config)
}

async fn join(network: &NetworkManager, name: &str) -> User {
    network
        .profiles()
        .register(NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "hash".to_string(),
            title: Some("Engineer".to_string()),
            location: Some("Remote".to_string()),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_request_and_accept_scenario() {
    for mode in [AcceptMode::Sequential, AcceptMode::Transactional] {
        let network = network(mode);
        let a = join(&network, "Ann").await;
        let b = join(&network, "Ben").await;

        network.relationships().send_request(&a.id, &b.id).await.unwrap();
        network.relationships().accept_request(&b.id, &a.id).await.unwrap();

        let a = network.profiles().get(&a.id).await.unwrap();
        let b = network.profiles().get(&b.id).await.unwrap();
        assert_eq!(a.connections, 1, "{mode}");
        assert_eq!(b.connections, 1, "{mode}");
        assert!(b.pending_connections.is_empty());
        assert_eq!(ConnectionState::between(&a, &b), ConnectionState::Connected);

        let listed = network.relationships().list_connections(&a.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, b.id);
    }
}

#[tokio::test]
async fn test_suggestions_scenario() {
    let network = network(AcceptMode::Sequential);
    let c = join(&network, "Cat").await;
    let d = join(&network, "Dan").await;
    let e = join(&network, "Eve").await;
    let f = join(&network, "Fay").await;
    let g = join(&network, "Gus").await;

    // D has a pending request to C, C is connected to E
    network.relationships().send_request(&d.id, &c.id).await.unwrap();
    network.relationships().send_request(&e.id, &c.id).await.unwrap();
    network.relationships().accept_request(&c.id, &e.id).await.unwrap();

    let suggestions = network.relationships().suggest(&c.id).await.unwrap();
    let mut ids: Vec<UserId> = suggestions.into_iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![f.id, g.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_engagement_idempotence() {
    let network = network(AcceptMode::Sequential);
    let a = join(&network, "Ann").await;
    let b = join(&network, "Ben").await;

    let post = network.posts().create(&b.id, "Shipping today", None).await.unwrap();

    network.engagement().toggle_like(&post.id, &a.id).await.unwrap();
    let after_two = network.engagement().toggle_like(&post.id, &a.id).await.unwrap();
    assert_eq!(after_two.likes_count, 0);

    network.engagement().share_post(&post.id, &a.id).await.unwrap();
    let shared = network.engagement().share_post(&post.id, &a.id).await.unwrap();
    assert_eq!(shared.shares_count, 1);

    let commented = network
        .engagement()
        .add_comment(&post.id, &a.id, "Congrats!")
        .await
        .unwrap();
    assert_eq!(commented.comments_count, 1);

    let job = network
        .jobs()
        .create(
            &b.id,
            NewJob {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                job_type: JobType::FullTime,
                description: "Rust services".to_string(),
                requirements: vec![],
                salary: None,
            },
        )
        .await
        .unwrap();
    network.engagement().apply_to_job(&job.id, &a.id).await.unwrap();
    assert!(matches!(
        network.engagement().apply_to_job(&job.id, &a.id).await,
        Err(LinkupError::Conflict(_))
    ));
    let job = network.jobs().get(&job.id).await.unwrap();
    assert_eq!(job.applicants_count, 1);
    assert_eq!(job.applicants[0].id, a.id);
}

#[tokio::test]
async fn test_views_survive_deleted_users() {
    let network = network(AcceptMode::Sequential);
    let a = join(&network, "Ann").await;
    let post = network.posts().create(&a.id, "hello", None).await.unwrap();

    network
        .engagement()
        .toggle_like(&post.id, &UserId::from("no-longer-here"))
        .await
        .unwrap();

    let view = network.posts().get(&post.id).await.unwrap();
    assert_eq!(view.likes_count, 1);
    assert!(view.likes.is_empty());
}
