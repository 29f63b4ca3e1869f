//! Main token service implementation

use chrono::{TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};

use crate::domain::entities::token::{ClaimSet, Claims, TokenInfo, TokenKind, TokenPair};
use crate::errors::TokenError;
use crate::repositories::TokenDenylist;

use super::config::{TokenConfigError, TokenServiceConfig};
use super::extract::extract_bearer_token;

/// Service for issuing, verifying and rotating JWT credentials.
///
/// All signing state is derived from the configuration at construction;
/// the denylist is the only collaborator consulted at verification time.
pub struct TokenService<D: TokenDenylist> {
    pub(crate) denylist: D,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl<D: TokenDenylist> TokenService<D> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `denylist` - Revocation store consulted on verify
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance, or an error when the configured
    /// secrets violate the per-kind invariants
    pub fn new(denylist: D, config: TokenServiceConfig) -> Result<Self, TokenConfigError> {
        config.validate()?;

        let access_encoding_key = EncodingKey::from_secret(config.access_token_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_token_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_token_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_token_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            denylist,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        })
    }

    /// Generates a signed token of the given kind for a claim set.
    ///
    /// Embeds issuer, audience and an expiry of now plus the kind's
    /// configured TTL, and signs with the kind's secret. Each call draws a
    /// fresh token ID, so the output is never memoizable.
    pub fn generate(&self, claim_set: &ClaimSet, kind: TokenKind) -> Result<String, TokenError> {
        let claims = Claims::new(
            claim_set.clone(),
            kind,
            self.config.ttl_for(kind),
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims)
    }

    /// Generates an access/refresh pair from one claim set
    pub fn generate_pair(&self, claim_set: &ClaimSet) -> Result<TokenPair, TokenError> {
        let access_token = self.generate(claim_set, TokenKind::Access)?;
        let refresh_token = self.generate(claim_set, TokenKind::Refresh)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.expires_in_seconds(TokenKind::Access),
            self.config.expires_in_seconds(TokenKind::Refresh),
        ))
    }

    /// Verifies a token of the given kind and returns its claims
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT to verify
    /// * `kind` - The kind the caller expects the token to be
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, issuer, audience and validity window all
    ///   check out against the kind's policy, and the token is not revoked
    /// * `Err(TokenError)` - `TokenExpired`, `TokenRevoked`,
    ///   `InvalidTokenKind` for a token of the other kind, `InvalidToken`
    ///   otherwise
    pub async fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.decode_verified(token, kind)?;

        match self.denylist.contains(&claims.jti).await {
            Ok(true) => return Err(TokenError::TokenRevoked),
            Ok(false) => {}
            // Revocation is best-effort; an unreachable store must not take
            // authentication down with it
            Err(e) => warn!("denylist lookup failed, allowing token: {}", e),
        }

        Ok(claims)
    }

    /// Decodes a token without checking its signature or expiry.
    ///
    /// Inspection only: the returned claims are unverified and must never
    /// feed an authorization decision. Use [`TokenService::verify`] for
    /// that.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Expiration instant recorded in a token, unverified
    pub fn expiration(&self, token: &str) -> Option<chrono::DateTime<Utc>> {
        self.decode(token)
            .and_then(|claims| Utc.timestamp_opt(claims.exp, 0).single())
    }

    /// Whether a token is past its expiry; `true` for unreadable tokens
    pub fn is_expired(&self, token: &str) -> bool {
        match self.expiration(token) {
            Some(expiration) => expiration <= Utc::now(),
            None => true,
        }
    }

    /// Credential kind a token claims to be, unverified
    pub fn token_kind(&self, token: &str) -> Option<TokenKind> {
        self.decode(token).map(|claims| claims.kind)
    }

    /// Rotates a refresh token into a fresh token pair.
    ///
    /// The presented token is fully re-verified, then retired: its ID goes
    /// on the denylist for the remainder of its natural lifetime, so a
    /// leaked refresh token is single-use at most.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New pair minted from the token's claim set
    /// * `Err(TokenError)` - Same taxonomy as [`TokenService::verify`]
    pub async fn refresh_pair(&self, refresh_token: &str) -> Result<TokenPair, TokenError> {
        let claims = self.verify(refresh_token, TokenKind::Refresh).await?;
        let claim_set = claims.claim_set()?;

        let expires_at = claims.expiration().unwrap_or_else(Utc::now);
        if let Err(e) = self.denylist.add(&claims.jti, expires_at).await {
            warn!(jti = %claims.jti, "failed to retire rotated refresh token: {}", e);
        }
        debug!(jti = %claims.jti, "rotated refresh token");

        self.generate_pair(&claim_set)
    }

    /// Revokes a token ahead of its natural expiry.
    ///
    /// The token is verified against its own embedded kind first, so a
    /// forged string cannot be used to write to the denylist.
    pub async fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let kind = self.token_kind(token).ok_or(TokenError::InvalidToken)?;
        let claims = self.decode_verified(token, kind)?;
        let expires_at = claims.expiration().ok_or(TokenError::InvalidToken)?;

        self.denylist.add(&claims.jti, expires_at).await
    }

    /// Extracts a bearer token from an Authorization header value and
    /// verifies it as the given kind
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Header carried a well-formed bearer token that
    ///   verified
    /// * `Err(TokenError)` - `MissingToken` when the header is absent or
    ///   not a bearer credential; otherwise the `verify` taxonomy
    pub async fn extract_and_verify(
        &self,
        header: Option<&str>,
        kind: TokenKind,
    ) -> Result<Claims, TokenError> {
        let token = extract_bearer_token(header).ok_or(TokenError::MissingToken)?;
        self.verify(token, kind).await
    }

    /// Non-throwing verification, for callers that only need a yes or no
    pub async fn is_valid(&self, token: &str, kind: TokenKind) -> bool {
        self.verify(token, kind).await.is_ok()
    }

    /// Diagnostic bundle for observability and debugging.
    ///
    /// Everything in the result is advisory; none of it implies the token
    /// would pass [`TokenService::verify`].
    pub async fn inspect(&self, token: &str) -> TokenInfo {
        let claims = self.decode(token);
        let expiration = claims
            .as_ref()
            .and_then(|c| Utc.timestamp_opt(c.exp, 0).single());
        let is_expired = match expiration {
            Some(expiration) => expiration <= Utc::now(),
            None => true,
        };
        let is_revoked = match &claims {
            Some(c) => self.denylist.contains(&c.jti).await.unwrap_or(false),
            None => false,
        };

        TokenInfo {
            kind: claims.as_ref().map(|c| c.kind),
            claims,
            is_expired,
            is_revoked,
            expiration,
        }
    }

    /// Encodes claims into a JWT signed with the secret for their kind
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, self.encoding_key(claims.kind))
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Signature and claim validation without the denylist lookup
    fn decode_verified(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, self.decoding_key(kind), &self.validation)
            .map_err(|e| self.classify_error(e, token, kind))?;

        // Secrets differ per kind, but the embedded discriminator is the
        // contract; a matching signature alone is not enough
        if data.claims.kind != kind {
            return Err(TokenError::InvalidTokenKind);
        }

        Ok(data.claims)
    }

    fn classify_error(
        &self,
        err: jsonwebtoken::errors::Error,
        token: &str,
        kind: TokenKind,
    ) -> TokenError {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => {
                // A clean payload of the other kind means the caller was
                // handed the wrong credential, not a forged one
                match self.decode(token) {
                    Some(claims) if claims.kind != kind => TokenError::InvalidTokenKind,
                    _ => TokenError::InvalidToken,
                }
            }
            _ => TokenError::InvalidToken,
        }
    }

    fn encoding_key(&self, kind: TokenKind) -> &EncodingKey {
        match kind {
            TokenKind::Access => &self.access_encoding_key,
            TokenKind::Refresh => &self.refresh_encoding_key,
        }
    }

    fn decoding_key(&self, kind: TokenKind) -> &DecodingKey {
        match kind {
            TokenKind::Access => &self.access_decoding_key,
            TokenKind::Refresh => &self.refresh_decoding_key,
        }
    }
}
