pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use password::{PasswordError, PasswordPolicy};

/// Decoded payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    /// Unix timestamp (seconds).
    pub exp: i64,
}

impl Claims {
    /// A token is expired once `now` is strictly past `exp`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Signing(String),

    #[error("token lifetime of {0} minutes is out of range")]
    InvalidLifetime(i64),

    #[error("signature is invalid")]
    InvalidSignature,

    #[error("token is missing required claim: {0}")]
    MissingClaim(String),

    #[error("token is malformed: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

/// Longest lifetime accepted from configuration: one year.
pub const MAX_EXPIRE_MINUTES: i64 = 60 * 24 * 366;

/// Issues and verifies HS256 access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expire_minutes: i64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("expire_minutes", &self.expire_minutes)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, expire_minutes: i64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if !(1..=MAX_EXPIRE_MINUTES).contains(&expire_minutes) {
            return Err(TokenError::InvalidLifetime(expire_minutes));
        }

        // Expiry is checked by the callers, not here.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expire_minutes,
        })
    }

    pub fn expire_minutes(&self) -> i64 {
        self.expire_minutes
    }

    /// Sign a token for `user_id` valid for the configured number of minutes.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue_for(user_id, self.expire_minutes)
    }

    /// Sign a token for `user_id` expiring `minutes` from now. Negative values
    /// produce an already expired token.
    pub fn issue_for(&self, user_id: Uuid, minutes: i64) -> Result<String, TokenError> {
        let expires_at = Duration::try_minutes(minutes)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or(TokenError::InvalidLifetime(minutes))?;
        self.issue_until(user_id, expires_at)
    }

    /// Sign a token for `user_id` with an explicit expiry instant.
    pub fn issue_until(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            user_id,
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a raw token string. Expired tokens are accepted.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify the value of an `Authorization` header.
    pub fn verify_header(&self, raw_header: &str) -> Result<Claims, TokenError> {
        self.verify(extract_bearer(raw_header))
    }
}

/// Take the token out of `Bearer <token>`. Anything that does not split into
/// exactly two space-separated parts yields an empty string.
pub fn extract_bearer(raw_header: &str) -> &str {
    let mut parts = raw_header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(token), None) => token,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 15).unwrap()
    }

    #[test]
    fn issued_token_verifies_with_subject_and_future_expiry() {
        let tokens = service();
        let user_id = Uuid::new_v4();

        let token = tokens.issue(user_id).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert!(claims.exp > Utc::now().timestamp());
        assert!(!claims.is_expired(Utc::now()));
    }

    #[test]
    fn expired_token_still_verifies() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens
            .issue_until(user_id, Utc::now() - Duration::minutes(5))
            .unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert!(claims.is_expired(Utc::now()));
    }

    #[test]
    fn expiry_boundary_is_strict() {
        let now = Utc::now();
        let claims = Claims { user_id: Uuid::new_v4(), exp: now.timestamp() };
        assert!(!claims.is_expired(now));
        assert!(claims.is_expired(now + Duration::seconds(1)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new("another-secret", 15).unwrap();
        let token = other.issue(Uuid::new_v4()).unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4()).unwrap();
        let forged_payload = tokens.issue(Uuid::new_v4()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged_payload.split('.').nth(1).unwrap();
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_err());
    }

    #[test]
    fn missing_user_id_is_a_decode_error() {
        #[derive(Serialize)]
        struct OnlyExp {
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &OnlyExp { exp: Utc::now().timestamp() + 60 },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn missing_exp_is_rejected() {
        #[derive(Serialize)]
        struct OnlyUser {
            user_id: Uuid,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &OnlyUser { user_id: Uuid::new_v4() },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        // The payload fails to deserialize into Claims before claim validation runs
        assert!(matches!(
            service().verify(&token),
            Err(TokenError::MissingClaim(_)) | Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn extracts_bearer_value() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(extract_bearer("Bearer"), "");
        assert_eq!(extract_bearer(""), "");
        assert_eq!(extract_bearer("Bearer a b"), "");
    }

    #[test]
    fn malformed_header_fails_verification() {
        let tokens = service();
        let token = tokens.issue(Uuid::new_v4()).unwrap();

        assert!(tokens.verify_header(&format!("Bearer {token}")).is_ok());
        assert!(tokens.verify_header(&token).is_err());
        assert!(tokens.verify_header("").is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(TokenService::new("", 15), Err(TokenError::MissingSecret)));
    }

    #[test]
    fn out_of_range_lifetime_is_refused_at_construction() {
        for minutes in [0, -5, MAX_EXPIRE_MINUTES + 1, 1_000_000_000_000, i64::MAX] {
            assert!(
                matches!(TokenService::new("s", minutes), Err(TokenError::InvalidLifetime(m)) if m == minutes),
                "{minutes} should be refused"
            );
        }
        assert!(TokenService::new("s", MAX_EXPIRE_MINUTES).is_ok());
    }

    #[test]
    fn overflowing_explicit_lifetime_is_an_error() {
        let tokens = service();
        for minutes in [1_000_000_000_000, i64::MAX, i64::MIN] {
            assert!(matches!(
                tokens.issue_for(Uuid::new_v4(), minutes),
                Err(TokenError::InvalidLifetime(m)) if m == minutes
            ));
        }
    }

    #[test]
    fn negative_explicit_lifetime_yields_expired_token() {
        let tokens = service();
        let token = tokens.issue_for(Uuid::new_v4(), -1).unwrap();
        assert!(tokens.verify(&token).unwrap().is_expired(Utc::now()));
    }
}
