use super::*;
use cmn_core::ID;
use cmn_core::Unique;

/// Seconds since the Unix epoch.
pub(crate) fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_secs() as i64
}

/// Payload of an access token: enough identity to authorize a request
/// without another store read at verification time.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct AccessClaims {
    pub sub: uuid::Uuid,
    pub usr: String,
    pub eml: String,
    pub iat: i64,
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(account: &Account, ttl: std::time::Duration) -> Self {
        let now = now();
        Self {
            sub: account.id().inner(),
            usr: account.username().to_string(),
            eml: account.email().to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
}

/// Payload of a refresh token: subject only. Its real authority lives on
/// the account record, which must hold this exact token value.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RefreshClaims {
    pub sub: uuid::Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(account: &Account, ttl: std::time::Duration) -> Self {
        let now = now();
        Self {
            sub: account.id().inner(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        }
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.sub)
    }
}
