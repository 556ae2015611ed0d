//! In-memory collaborator fakes for exercising the session lifecycle
//! without a database or an image host.
use super::*;
use cmn_core::ID;
use cmn_core::Unique;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// In-memory account store.
#[derive(Default)]
pub struct Memory {
    rows: Mutex<HashMap<uuid::Uuid, Account>>,
}

impl Memory {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
    pub fn purge(&self, id: ID<Account>) {
        self.rows.lock().unwrap().remove(&id.inner());
    }
    pub fn refresh(&self, id: ID<Account>) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .get(&id.inner())
            .and_then(|a| a.refresh().map(str::to_string))
    }
    pub fn avatar(&self, id: ID<Account>) -> String {
        self.rows
            .lock()
            .unwrap()
            .get(&id.inner())
            .map(|a| a.avatar().to_string())
            .expect("account exists")
    }
    pub fn promote(&self, id: ID<Account>) {
        self.rows
            .lock()
            .unwrap()
            .get_mut(&id.inner())
            .expect("account exists")
            .promote();
    }
}

#[async_trait::async_trait]
impl Accounts for Memory {
    async fn find_by_login_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<Account>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.username() == username || a.email() == email)
            .cloned())
    }
    async fn find_by_id(&self, id: ID<Account>) -> anyhow::Result<Option<Account>> {
        Ok(self.rows.lock().unwrap().get(&id.inner()).cloned())
    }
    async fn create(&self, account: &Account) -> anyhow::Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(account.id().inner(), account.clone());
        Ok(())
    }
    async fn save(&self, account: &Account) -> anyhow::Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(account.id().inner(), account.clone());
        Ok(())
    }
    async fn all(&self) -> anyhow::Result<Vec<Account>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}

/// Image host that accepts everything.
pub struct Stub;

#[async_trait::async_trait]
impl Images for Stub {
    async fn upload(&self, _: &[u8]) -> anyhow::Result<String> {
        Ok(format!("/media/{}", uuid::Uuid::now_v7()))
    }
}

/// Image host that rejects everything.
pub struct Broken;

#[async_trait::async_trait]
impl Images for Broken {
    async fn upload(&self, _: &[u8]) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("image host unavailable"))
    }
}

pub fn crypto() -> Crypto {
    Crypto::new(TokenConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl: std::time::Duration::from_secs(900),
        refresh_ttl: std::time::Duration::from_secs(604800),
    })
}

/// A deliberately cheap work factor; these tests hash a lot.
pub fn hasher() -> Hasher {
    Hasher::new(1024, 1, 1)
}

pub fn account(username: &str) -> Account {
    Account::new(
        username.to_string(),
        format!("{}@example.com", username),
        "$argon2id$placeholder".to_string(),
        cmn_core::DEFAULT_AVATAR.to_string(),
    )
}

pub fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "pw123456".to_string(),
        picture: None,
    }
}

pub fn sessions() -> (Arc<Memory>, Sessions) {
    let memory = Arc::new(Memory::default());
    let sessions = Sessions::new(memory.clone(), Arc::new(Stub), crypto(), hasher());
    (memory, sessions)
}

pub fn broken_sessions() -> (Arc<Memory>, Sessions) {
    let memory = Arc::new(Memory::default());
    let sessions = Sessions::new(memory.clone(), Arc::new(Broken), crypto(), hasher());
    (memory, sessions)
}
