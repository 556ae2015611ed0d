use cmn_core::ID;
use cmn_core::Unique;

/// A stored user account, exclusively owned by the persistent store.
/// Every operation re-fetches one record, validates, and persists it back;
/// nothing is cached across requests.
///
/// The `refresh` field is the whole session state machine: `None` means no
/// live session (Anonymous), `Some` holds the single currently-valid
/// refresh token (Active). Overwriting it invalidates any prior session.
#[derive(Debug, Clone)]
pub struct Account {
    id: ID<Self>,
    username: String,
    email: String,
    hashword: String,
    refresh: Option<String>,
    admin: bool,
    avatar: String,
    bio: String,
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl Account {
    /// A freshly registered account: hashed credentials, no live session,
    /// no privileges.
    pub fn new(username: String, email: String, hashword: String, avatar: String) -> Self {
        Self {
            id: ID::default(),
            username,
            email,
            hashword,
            refresh: None,
            admin: false,
            avatar,
            bio: String::new(),
        }
    }
    /// Rehydrates a record in whatever state the store holds.
    pub fn stored(
        id: ID<Self>,
        username: String,
        email: String,
        hashword: String,
        refresh: Option<String>,
        admin: bool,
        avatar: String,
        bio: String,
    ) -> Self {
        Self {
            id,
            username,
            email,
            hashword,
            refresh,
            admin,
            avatar,
            bio,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
    pub fn refresh(&self) -> Option<&str> {
        self.refresh.as_deref()
    }
    pub fn admin(&self) -> bool {
        self.admin
    }
    pub fn avatar(&self) -> &str {
        &self.avatar
    }
    pub fn bio(&self) -> &str {
        &self.bio
    }
    /// Whether a session is live.
    pub fn active(&self) -> bool {
        self.refresh.is_some()
    }
    /// Starts or rotates the session. Any prior refresh token dies here.
    pub fn begin(&mut self, refresh: String) {
        self.refresh = Some(refresh);
    }
    /// Ends the session unconditionally, whichever device asked.
    pub fn end(&mut self) {
        self.refresh = None;
    }
    /// Swaps the password hash. Session state is untouched.
    pub fn rekey(&mut self, hashword: String) {
        self.hashword = hashword;
    }
    pub fn rename(&mut self, username: String) {
        self.username = username;
    }
    pub fn readdress(&mut self, email: String) {
        self.email = email;
    }
    pub fn repicture(&mut self, avatar: String) {
        self.avatar = avatar;
    }
    pub fn rebio(&mut self, bio: String) {
        self.bio = bio;
    }
    /// Grants the administrative flag. Only reachable out-of-band; no
    /// lifecycle operation ever sets it.
    pub fn promote(&mut self) {
        self.admin = true;
    }
    /// The redacted view: no password hash, no refresh token.
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id.inner(),
            username: self.username.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            admin: self.admin,
        }
    }
}

/// Redacted account view. This is the only user shape that crosses the
/// HTTP boundary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Profile {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub admin: bool,
}
