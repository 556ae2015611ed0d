use super::*;
use cmn_core::ID;
use cmn_core::Unique;
use cmn_pg::*;
use tokio_postgres::Client;
use tokio_postgres::Row;

impl Schema for Account {
    fn name() -> &'static str {
        USERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            USERS,
            " (
                id        UUID PRIMARY KEY,
                username  VARCHAR(32) UNIQUE NOT NULL,
                email     VARCHAR(255) UNIQUE NOT NULL,
                hashword  TEXT NOT NULL,
                refresh   TEXT,
                admin     BOOLEAN NOT NULL DEFAULT FALSE,
                avatar    TEXT NOT NULL,
                bio       TEXT NOT NULL DEFAULT ''
            );"
        )
    }
    fn indices() -> &'static str {
        const_format::concatcp!(
            "CREATE INDEX IF NOT EXISTS idx_users_username ON ",
            USERS,
            " (username);
             CREATE INDEX IF NOT EXISTS idx_users_email ON ",
            USERS,
            " (email);"
        )
    }
}

const FIELDS: &str = "id, username, email, hashword, refresh, admin, avatar, bio";

fn hydrate(row: &Row) -> Account {
    Account::stored(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get(1),
        row.get(2),
        row.get(3),
        row.get(4),
        row.get(5),
        row.get(6),
        row.get(7),
    )
}

#[async_trait::async_trait]
impl Accounts for Client {
    async fn find_by_login_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<Option<Account>> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    FIELDS,
                    " FROM ",
                    USERS,
                    " WHERE username = $1 OR email = $2"
                ),
                &[&username, &email],
            )
            .await?
            .map(|ref row| hydrate(row)))
    }

    async fn find_by_id(&self, id: ID<Account>) -> anyhow::Result<Option<Account>> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", FIELDS, " FROM ", USERS, " WHERE id = $1"),
                &[&id.inner()],
            )
            .await?
            .map(|ref row| hydrate(row)))
    }

    async fn create(&self, account: &Account) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (",
                FIELDS,
                ") VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            ),
            &[
                &account.id().inner(),
                &account.username(),
                &account.email(),
                &account.hashword(),
                &account.refresh(),
                &account.admin(),
                &account.avatar(),
                &account.bio(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn save(&self, account: &Account) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET username = $2, email = $3, hashword = $4, refresh = $5, admin = $6, avatar = $7, bio = $8 WHERE id = $1"
            ),
            &[
                &account.id().inner(),
                &account.username(),
                &account.email(),
                &account.hashword(),
                &account.refresh(),
                &account.admin(),
                &account.avatar(),
                &account.bio(),
            ],
        )
        .await?;
        Ok(())
    }

    async fn all(&self) -> anyhow::Result<Vec<Account>> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT ",
                    FIELDS,
                    " FROM ",
                    USERS,
                    " ORDER BY username"
                ),
                &[],
            )
            .await?
            .iter()
            .map(hydrate)
            .collect())
    }
}
