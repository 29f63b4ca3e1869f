//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Discriminator for the two credential kinds issued by the token service.
///
/// The kind determines which signing secret and expiry policy apply, and is
/// embedded in the payload so a token can never be replayed against the
/// wrong endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential presented on each authenticated request
    Access,
    /// Long-lived credential presented only to mint new token pairs
    Refresh,
}

/// Identity payload callers hand to the token service.
///
/// Immutable once embedded in a signed token; changing the role or
/// permissions requires issuing a new token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// User ID
    pub user_id: Uuid,

    /// User email at issuance time
    pub email: String,

    /// Active tenant account, once the user has selected one
    pub account_id: Option<Uuid>,

    /// Tenant role at issuance time
    pub role: Option<String>,

    /// Ordered permission strings granted within the tenant
    pub permissions: Option<Vec<String>>,
}

impl ClaimSet {
    /// Creates a claim set carrying only the required identity fields
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            account_id: None,
            role: None,
            permissions: None,
        }
    }

    /// Attaches an active tenant context and the role held within it
    pub fn with_account(mut self, account_id: Uuid, role: impl Into<String>) -> Self {
        self.account_id = Some(account_id);
        self.role = Some(role.into());
        self
    }

    /// Attaches the ordered permission list granted at issuance time
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = Some(permissions);
        self
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Which credential kind this token was issued as
    pub kind: TokenKind,

    /// User email at issuance time
    pub email: String,

    /// Active tenant account (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,

    /// Tenant role at issuance time (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Permission strings granted within the tenant (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Creates the full JWT payload for a claim set.
    ///
    /// Temporal claims are anchored at the current instant; the expiry is
    /// `now + ttl` and each call draws a fresh `jti`, so two tokens minted
    /// from the same claim set are never byte-identical.
    pub fn new(
        claim_set: ClaimSet,
        kind: TokenKind,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: claim_set.user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
            kind,
            email: claim_set.email,
            account_id: claim_set.account_id,
            role: claim_set.role,
            permissions: claim_set.permissions,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are inside their validity window (nbf..exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiration instant of the token carrying these claims
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Extracts the identity payload, stripping the temporal claims.
    ///
    /// Fails with `InvalidToken` when the subject is not a well-formed ID.
    pub fn claim_set(&self) -> Result<ClaimSet, TokenError> {
        let user_id = self.user_id().map_err(|_| TokenError::InvalidToken)?;

        Ok(ClaimSet {
            user_id,
            email: self.email.clone(),
            account_id: self.account_id,
            role: self.role.clone(),
            permissions: self.permissions.clone(),
        })
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the configured expiry windows
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

/// Diagnostic bundle describing a token without vouching for it.
///
/// Produced by unverified inspection; never a basis for authorization.
#[derive(Debug, Clone, Serialize)]
pub struct TokenInfo {
    /// Credential kind the token claims to be, if readable
    pub kind: Option<TokenKind>,

    /// Unverified payload, if readable
    pub claims: Option<Claims>,

    /// Whether the token is past its expiry (true for unreadable tokens)
    pub is_expired: bool,

    /// Whether the token's ID is on the denylist
    pub is_revoked: bool,

    /// Expiration instant, if readable
    pub expiration: Option<DateTime<Utc>>,
}
