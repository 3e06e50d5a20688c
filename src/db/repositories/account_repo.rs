//! Postgres account repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::{AccountStore, KeyQuery, PutOutcome, UniquenessCondition},
    error::{ConfigError, InfraError},
    models::Account,
};

const ACCOUNT_COLUMNS: &str = "username, email, password_hash, member_since, num_ratings, is_verified";

/// Longest identifier Postgres keeps without truncation
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Account store backed by a Postgres table.
///
/// `username` is the primary key and `email` carries a unique constraint, so
/// the database itself arbitrates concurrent inserts.
pub struct PgAccountStore {
    pool: PgPool,
    table: String,
}

impl PgAccountStore {
    pub fn new(pool: PgPool, table_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            pool,
            table: validate_table_name(table_name)?,
        })
    }

    /// Create the account table and its constraints if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), InfraError> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                username TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                member_since BIGINT NOT NULL,
                num_ratings INTEGER NOT NULL DEFAULT 0,
                is_verified BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
            self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;

        Ok(())
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn query(&self, query: &KeyQuery) -> Result<Vec<Account>, InfraError> {
        // The unique constraint's index serves secondary-key lookups; the hint is informational.
        if let Some(index) = &query.index {
            tracing::trace!(index = %index, key = query.key.column(), "Secondary key lookup");
        }

        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM {} WHERE {} = $1",
            self.table,
            query.key.column()
        );
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .bind(&query.value)
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }

    async fn conditional_put(
        &self,
        account: &Account,
        condition: UniquenessCondition,
    ) -> Result<PutOutcome, InfraError> {
        let on_conflict = match condition {
            UniquenessCondition::AllUniqueKeysAbsent => "ON CONFLICT DO NOTHING",
        };
        let sql = format!(
            r#"
            INSERT INTO {} ({ACCOUNT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6)
            {on_conflict}
            RETURNING username
            "#,
            self.table
        );

        let inserted = sqlx::query_scalar::<_, String>(&sql)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.member_since)
            .bind(account.num_ratings)
            .bind(account.is_verified)
            .fetch_optional(&self.pool)
            .await;

        match inserted {
            Ok(Some(_)) => Ok(PutOutcome::Written),
            Ok(None) => Ok(PutOutcome::Conflict),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(PutOutcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Accept only plain SQL identifiers, since the name is spliced into statements
fn validate_table_name(name: &str) -> Result<String, ConfigError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name.len() <= MAX_IDENTIFIER_LENGTH;

    if valid {
        Ok(name.to_string())
    } else {
        Err(ConfigError::InvalidTableName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_table_name() {
        assert_eq!(validate_table_name("accounts").unwrap(), "accounts");
        assert!(validate_table_name("user_accounts_v2").is_ok());
        assert!(validate_table_name("_accounts").is_ok());

        for bad in ["", "1accounts", "accounts;drop", "public.accounts", "acc ounts", "\"accounts\""] {
            assert!(
                matches!(validate_table_name(bad), Err(ConfigError::InvalidTableName(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(validate_table_name(&"a".repeat(64)).is_err());
    }
}
