//! Transport-level helpers: bearer extraction and shape checks.

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// Returns `None` when the header is absent, uses another scheme, or
/// carries nothing after the prefix.
pub fn extract_bearer_token(header: Option<&str>) -> Option<&str> {
    let rest = header?.strip_prefix("Bearer ")?.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Checks that a token has the compact three-segment JWT shape.
///
/// A cheap pre-filter before a full verification; says nothing about the
/// signature.
pub fn is_well_formed(token: &str) -> bool {
    let mut segments = token.split('.');
    let well_formed = segments.by_ref().take(3).filter(|s| !s.is_empty()).count() == 3;
    well_formed && segments.next().is_none()
}
