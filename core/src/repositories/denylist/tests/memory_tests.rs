//! Tests for the shipped denylist implementations

use chrono::{Duration, Utc};

use crate::repositories::denylist::{InMemoryDenylist, NoOpDenylist, TokenDenylist};

#[tokio::test]
async fn test_add_then_contains() {
    let denylist = InMemoryDenylist::new();
    let expires_at = Utc::now() + Duration::minutes(15);

    denylist.add("jti-1", expires_at).await.unwrap();

    assert!(denylist.contains("jti-1").await.unwrap());
    assert!(!denylist.contains("jti-2").await.unwrap());
}

#[tokio::test]
async fn test_lapsed_entry_counts_as_absent() {
    let denylist = InMemoryDenylist::new();
    let expired_at = Utc::now() - Duration::minutes(1);

    denylist.add("jti-1", expired_at).await.unwrap();

    assert!(!denylist.contains("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_purge_removes_only_lapsed_entries() {
    let denylist = InMemoryDenylist::new();

    denylist
        .add("lapsed", Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    denylist
        .add("live", Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    assert_eq!(denylist.len().await, 2);

    let purged = denylist.purge_expired().await.unwrap();

    assert_eq!(purged, 1);
    assert_eq!(denylist.len().await, 1);
    assert!(denylist.contains("live").await.unwrap());
}

#[tokio::test]
async fn test_purge_on_empty_store() {
    let denylist = InMemoryDenylist::new();

    assert!(denylist.is_empty().await);
    assert_eq!(denylist.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clones_share_state() {
    let denylist = InMemoryDenylist::new();
    let shared = denylist.clone();
    let expires_at = Utc::now() + Duration::minutes(15);

    denylist.add("jti-1", expires_at).await.unwrap();

    assert!(shared.contains("jti-1").await.unwrap());
}

#[tokio::test]
async fn test_noop_never_revokes() {
    let denylist = NoOpDenylist::new();
    let expires_at = Utc::now() + Duration::minutes(15);

    denylist.add("jti-1", expires_at).await.unwrap();

    assert!(!denylist.contains("jti-1").await.unwrap());
    assert_eq!(denylist.purge_expired().await.unwrap(), 0);
}
