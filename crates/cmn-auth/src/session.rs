use super::*;
use cmn_core::ID;
use std::sync::Arc;

/// Registration input after transport decoding.
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub picture: Option<Vec<u8>>,
}

/// Partial profile edit; absent fields are left alone.
#[derive(Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
}

fn email_ok(email: &str) -> bool {
    // same shape the original enforced: local@domain.tld
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// The session lifecycle as a state machine over each account's stored
/// refresh token: Anonymous (none) and Active (exactly one live value).
/// Login and refresh rotate the value, logout clears it.
///
/// Every mutating operation is one fetch, validation, one persist against
/// a single record. Concurrent logins to the same account race on the
/// refresh field and resolve last-writer-wins; the losing session is
/// legitimately invalidated by the single-session-per-account model.
pub struct Sessions {
    accounts: Arc<dyn Accounts>,
    images: Arc<dyn Images>,
    crypto: Crypto,
    hasher: Hasher,
}

impl Sessions {
    pub fn new(
        accounts: Arc<dyn Accounts>,
        images: Arc<dyn Images>,
        crypto: Crypto,
        hasher: Hasher,
    ) -> Self {
        Self {
            accounts,
            images,
            crypto,
            hasher,
        }
    }

    /// Creates an account in the Anonymous state. The optional profile
    /// image is uploaded before anything is written, so an upload failure
    /// leaves no partial state behind.
    pub async fn register(&self, req: Registration) -> Result<Profile, AuthError> {
        let username = req.username.trim().to_string();
        let email = req.email.trim().to_lowercase();
        if username.is_empty() || email.is_empty() || req.password.is_empty() {
            return Err(AuthError::Invalid("All fields are required"));
        }
        if username.len() < cmn_core::USERNAME_MIN || username.len() > cmn_core::USERNAME_MAX {
            return Err(AuthError::Invalid("Username must be 3-32 characters"));
        }
        if req.password.len() < cmn_core::PASSWORD_MIN {
            return Err(AuthError::Invalid("Password must be at least 8 characters"));
        }
        if !email_ok(&email) {
            return Err(AuthError::Invalid("Invalid email format"));
        }
        if self
            .accounts
            .find_by_login_or_email(&username, &email)
            .await?
            .is_some()
        {
            return Err(AuthError::Conflict("User already exists"));
        }
        let avatar = match req.picture {
            Some(ref bytes) => self.images.upload(bytes).await?,
            None => cmn_core::DEFAULT_AVATAR.to_string(),
        };
        let hashword = self.hasher.hash(&req.password)?;
        let account = Account::new(username, email, hashword, avatar);
        self.accounts.create(&account).await?;
        log::info!("registered user {}", account.username());
        Ok(account.profile())
    }

    /// Verifies credentials and starts a session. A missing record and a
    /// wrong password are distinct failures, in that order.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(TokenPair, Profile), AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Invalid("All fields are required"));
        }
        let mut account = self
            .accounts
            .find_by_login_or_email(username, username)
            .await?
            .ok_or(AuthError::NotFound("User not found"))?;
        if !self.hasher.verify(password, account.hashword()) {
            return Err(AuthError::Unauthorized("Invalid credentials"));
        }
        let pair = self.issue(&mut account).await?;
        log::info!("user {} logged in", account.username());
        Ok((pair, account.profile()))
    }

    /// Exchanges a live refresh token for a new pair. The presented token
    /// must verify AND byte-equal the stored value; rotation makes the old
    /// token permanently dead even if its expiry has not passed.
    pub async fn refresh(&self, presented: &str) -> Result<(TokenPair, Profile), AuthError> {
        let claims = self
            .crypto
            .verify_refresh(presented)
            .map_err(|_| AuthError::Unauthorized("Invalid refresh token"))?;
        let mut account = self
            .accounts
            .find_by_id(claims.user())
            .await?
            .ok_or(AuthError::Unauthorized("User not found"))?;
        match account.refresh() {
            Some(stored) if stored == presented => {}
            _ => return Err(AuthError::Unauthorized("Invalid refresh token")),
        }
        let pair = self.issue(&mut account).await?;
        Ok((pair, account.profile()))
    }

    /// Clears the stored refresh token unconditionally, whichever device
    /// or token initiated the call. Already-issued access tokens keep
    /// verifying until they expire.
    pub async fn logout(&self, user: ID<Account>) -> Result<(), AuthError> {
        let mut account = self
            .accounts
            .find_by_id(user)
            .await?
            .ok_or(AuthError::NotFound("User not found"))?;
        account.end();
        self.accounts.save(&account).await?;
        log::info!("user {} logged out", account.username());
        Ok(())
    }

    /// Re-verifies the old password before persisting the new hash.
    /// Session state is untouched.
    pub async fn change_password(
        &self,
        user: ID<Account>,
        old: &str,
        new: &str,
    ) -> Result<(), AuthError> {
        if old.is_empty() || new.is_empty() {
            return Err(AuthError::Invalid("All fields are required"));
        }
        if new.len() < cmn_core::PASSWORD_MIN {
            return Err(AuthError::Invalid("Password must be at least 8 characters"));
        }
        let mut account = self
            .accounts
            .find_by_id(user)
            .await?
            .ok_or(AuthError::NotFound("User not found"))?;
        if !self.hasher.verify(old, account.hashword()) {
            return Err(AuthError::Unauthorized("Invalid credentials"));
        }
        account.rekey(self.hasher.hash(new)?);
        self.accounts.save(&account).await?;
        Ok(())
    }

    /// Applies whichever profile fields were supplied, revalidated against
    /// the registration rules. Renames re-check uniqueness so the invariant
    /// on username and email survives edits.
    pub async fn update_profile(
        &self,
        user: ID<Account>,
        update: ProfileUpdate,
    ) -> Result<Profile, AuthError> {
        let username = update.username.map(|u| u.trim().to_string());
        let email = update.email.map(|e| e.trim().to_lowercase());
        if username.is_none() && email.is_none() && update.bio.is_none() {
            return Err(AuthError::Invalid("At least one field is required to update"));
        }
        if let Some(ref username) = username {
            if username.len() < cmn_core::USERNAME_MIN || username.len() > cmn_core::USERNAME_MAX {
                return Err(AuthError::Invalid("Username must be 3-32 characters"));
            }
        }
        if let Some(ref email) = email {
            if !email_ok(email) {
                return Err(AuthError::Invalid("Invalid email format"));
            }
        }
        if let Some(ref bio) = update.bio {
            if bio.len() > cmn_core::BIO_MAX {
                return Err(AuthError::Invalid("Bio must be less than 200 characters long"));
            }
        }
        let mut account = self
            .accounts
            .find_by_id(user)
            .await?
            .ok_or(AuthError::NotFound("User not found"))?;
        if let Some(username) = username {
            if username != account.username() {
                if self
                    .accounts
                    .find_by_login_or_email(&username, &username)
                    .await?
                    .is_some()
                {
                    return Err(AuthError::Conflict("Username already taken"));
                }
                account.rename(username);
            }
        }
        if let Some(email) = email {
            if email != account.email() {
                if self
                    .accounts
                    .find_by_login_or_email(&email, &email)
                    .await?
                    .is_some()
                {
                    return Err(AuthError::Conflict("Email already taken"));
                }
                account.readdress(email);
            }
        }
        if let Some(bio) = update.bio {
            account.rebio(bio);
        }
        self.accounts.save(&account).await?;
        Ok(account.profile())
    }

    /// Uploads the replacement image first; a failed upload leaves the
    /// record untouched.
    pub async fn change_avatar(
        &self,
        user: ID<Account>,
        bytes: &[u8],
    ) -> Result<Profile, AuthError> {
        let mut account = self
            .accounts
            .find_by_id(user)
            .await?
            .ok_or(AuthError::NotFound("User not found"))?;
        let url = self.images.upload(bytes).await?;
        account.repicture(url);
        self.accounts.save(&account).await?;
        Ok(account.profile())
    }

    /// The request-authentication gate's core: verify the access token and
    /// confirm the subject still exists. Token validity alone is not
    /// enough; a deleted account fails here.
    pub async fn authenticate(&self, token: &str) -> Result<Profile, AuthError> {
        let claims = self.crypto.verify_access(token).map_err(|e| match e {
            TokenError::Expired => AuthError::Unauthorized("Access token expired"),
            _ => AuthError::Unauthorized("Invalid access token"),
        })?;
        self.accounts
            .find_by_id(claims.user())
            .await?
            .map(|account| account.profile())
            .ok_or(AuthError::Unauthorized("User not found"))
    }

    pub async fn current(&self, user: ID<Account>) -> Result<Profile, AuthError> {
        self.accounts
            .find_by_id(user)
            .await?
            .map(|account| account.profile())
            .ok_or(AuthError::NotFound("User not found"))
    }

    /// Every account, redacted. Admin-gated at the HTTP layer.
    pub async fn roster(&self) -> Result<Vec<Profile>, AuthError> {
        Ok(self
            .accounts
            .all()
            .await?
            .iter()
            .map(Account::profile)
            .collect())
    }

    /// Issues a fresh pair and persists the rotated refresh token.
    async fn issue(&self, account: &mut Account) -> Result<TokenPair, AuthError> {
        let access = self.crypto.issue_access(account)?;
        let refresh = self.crypto.issue_refresh(account)?;
        account.begin(refresh.clone());
        self.accounts.save(account).await?;
        Ok(TokenPair { access, refresh })
    }
}
