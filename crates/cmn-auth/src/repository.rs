use super::*;
use cmn_core::ID;

/// Minimal persistence contract the session core requires. The store is an
/// external collaborator with its own timeout and retry policy; failures
/// surface here as opaque errors and become `Fatal` upstream.
///
/// Object-safe so application state can hold `Arc<dyn Accounts>`.
#[async_trait::async_trait]
pub trait Accounts: Send + Sync {
    /// Matches either unique field. Registration passes both; login passes
    /// the presented name for both, accepting a login name or an email.
    async fn find_by_login_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<Account>>;
    async fn find_by_id(&self, id: ID<Account>) -> anyhow::Result<Option<Account>>;
    async fn create(&self, account: &Account) -> anyhow::Result<()>;
    /// Full overwrite of the record's mutable fields.
    async fn save(&self, account: &Account) -> anyhow::Result<()>;
    /// Every account, for the administrative roster.
    async fn all(&self) -> anyhow::Result<Vec<Account>>;
}
