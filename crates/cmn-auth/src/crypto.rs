use super::*;

/// Token secrets and lifetimes, read once at startup and injected into
/// [`Crypto`]. Never defaulted inside the signing component itself.
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: std::time::Duration,
    pub refresh_ttl: std::time::Duration,
}

impl TokenConfig {
    /// Reads `ACCESS_TOKEN_SECRET`, `REFRESH_TOKEN_SECRET`, and the optional
    /// `ACCESS_TOKEN_EXPIRY` / `REFRESH_TOKEN_EXPIRY` durations ("15m", "7d").
    pub fn from_env() -> Self {
        let ttl = |key: &str, fallback: std::time::Duration| {
            std::env::var(key)
                .ok()
                .and_then(|s| cmn_core::parse_duration(&s))
                .unwrap_or(fallback)
        };
        Self {
            access_secret: std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| String::default()),
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET").unwrap_or_else(|_| String::default()),
            access_ttl: ttl("ACCESS_TOKEN_EXPIRY", cmn_core::ACCESS_TOKEN_TTL),
            refresh_ttl: ttl("REFRESH_TOKEN_EXPIRY", cmn_core::REFRESH_TOKEN_TTL),
        }
    }
}

/// Why a presented token was rejected. Callers branch on this: an expired
/// access token and a forged refresh token produce different outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// Signs and verifies the two token kinds under separate secrets.
pub struct Crypto {
    access_encoding: jsonwebtoken::EncodingKey,
    access_decoding: jsonwebtoken::DecodingKey,
    refresh_encoding: jsonwebtoken::EncodingKey,
    refresh_decoding: jsonwebtoken::DecodingKey,
    access_ttl: std::time::Duration,
    refresh_ttl: std::time::Duration,
    validation: jsonwebtoken::Validation,
}

impl Crypto {
    pub fn new(config: TokenConfig) -> Self {
        // zero leeway keeps expiry exact
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        Self {
            access_encoding: jsonwebtoken::EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: jsonwebtoken::DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: jsonwebtoken::EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: jsonwebtoken::DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            validation,
        }
    }
    pub fn from_env() -> Self {
        Self::new(TokenConfig::from_env())
    }
    pub fn issue_access(&self, account: &Account) -> anyhow::Result<String> {
        let ref claims = AccessClaims::new(account, self.access_ttl);
        Ok(jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &self.access_encoding,
        )?)
    }
    pub fn issue_refresh(&self, account: &Account) -> anyhow::Result<String> {
        let ref claims = RefreshClaims::new(account, self.refresh_ttl);
        Ok(jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            claims,
            &self.refresh_encoding,
        )?)
    }
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        jsonwebtoken::decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

/// One access + one refresh credential, issued together at login and
/// rotated together at refresh.
#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use cmn_core::Unique;

    #[test]
    fn access_tokens_roundtrip() {
        let crypto = testing::crypto();
        let account = testing::account("alice");
        let token = crypto.issue_access(&account).unwrap();
        let claims = crypto.verify_access(&token).unwrap();
        assert!(claims.sub == account.id().inner());
        assert!(claims.usr == "alice");
    }

    #[test]
    fn refresh_tokens_roundtrip() {
        let crypto = testing::crypto();
        let account = testing::account("bob");
        let token = crypto.issue_refresh(&account).unwrap();
        let claims = crypto.verify_refresh(&token).unwrap();
        assert!(claims.sub == account.id().inner());
    }

    #[test]
    fn expired_tokens_are_flagged_expired() {
        let crypto = testing::crypto();
        let account = testing::account("carol");
        let mut claims = AccessClaims::new(&account, std::time::Duration::from_secs(3600));
        claims.exp = now() - 3600;
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &crypto.access_encoding,
        )
        .unwrap();
        assert!(crypto.verify_access(&token).unwrap_err() == TokenError::Expired);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let crypto = testing::crypto();
        let account = testing::account("dave");
        // access secret != refresh secret, so each kind rejects the other
        let token = crypto.issue_access(&account).unwrap();
        assert!(crypto.verify_refresh(&token).unwrap_err() == TokenError::InvalidSignature);
    }

    #[test]
    fn garbage_is_malformed() {
        let crypto = testing::crypto();
        assert!(crypto.verify_access("not-a-token").unwrap_err() == TokenError::Malformed);
        assert!(crypto.verify_refresh("").unwrap_err() == TokenError::Malformed);
    }
}
