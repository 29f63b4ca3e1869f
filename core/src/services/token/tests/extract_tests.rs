//! Tests for bearer extraction and token shape checks

use crate::services::token::{extract_bearer_token, is_well_formed, TokenService, TokenServiceConfig};
use crate::domain::entities::token::{ClaimSet, TokenKind};
use crate::repositories::InMemoryDenylist;
use uuid::Uuid;

#[test]
fn test_extract_bearer_token() {
    assert_eq!(extract_bearer_token(Some("Bearer abc123")), Some("abc123"));
}

#[test]
fn test_extract_rejects_empty_credential() {
    assert_eq!(extract_bearer_token(Some("Bearer ")), None);
    assert_eq!(extract_bearer_token(Some("Bearer    ")), None);
}

#[test]
fn test_extract_rejects_missing_header() {
    assert_eq!(extract_bearer_token(None), None);
}

#[test]
fn test_extract_rejects_other_schemes() {
    assert_eq!(extract_bearer_token(Some("Basic xyz")), None);
    assert_eq!(extract_bearer_token(Some("bearer abc")), None);
    assert_eq!(extract_bearer_token(Some("abc123")), None);
}

#[test]
fn test_extract_trims_padding() {
    assert_eq!(extract_bearer_token(Some("Bearer  abc123 ")), Some("abc123"));
}

#[test]
fn test_well_formed_shapes() {
    assert!(is_well_formed("aaa.bbb.ccc"));
    assert!(!is_well_formed(""));
    assert!(!is_well_formed("aaa"));
    assert!(!is_well_formed("aaa.bbb"));
    assert!(!is_well_formed("aaa.bbb.ccc.ddd"));
    assert!(!is_well_formed("..."));
    assert!(!is_well_formed("aaa..ccc"));
    assert!(!is_well_formed("aaa.bbb."));
}

#[test]
fn test_generated_tokens_are_well_formed() {
    let service = TokenService::new(InMemoryDenylist::new(), TokenServiceConfig::default())
        .expect("Failed to create token service");
    let claim_set = ClaimSet::new(Uuid::new_v4(), "a@b.com");

    let token = service.generate(&claim_set, TokenKind::Access).unwrap();

    assert!(is_well_formed(&token));
}
