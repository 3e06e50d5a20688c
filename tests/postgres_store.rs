//! Postgres account store tests
//!
//! Each test starts its own PostgreSQL container, so they need Docker and
//! are ignored by default. Run with `cargo test -- --ignored`.

use std::sync::Arc;

use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use registrar::{
    config::{DatabaseConfig, HashingConfig},
    db::{self, repositories::PgAccountStore, AccountKey, AccountStore, KeyQuery, PutOutcome, UniquenessCondition},
    models::{Account, RegistrationOutcome, RegistrationRequest},
    services::RegistrationService,
    utils::{time::FixedClock, CredentialHasher, RuleTable},
};

const TABLE: &str = "accounts_test";

/// Start a container and return it with a store on a fresh table
async fn start_store() -> (ContainerAsync<Postgres>, PgAccountStore) {
    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container");
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();

    let pool = db::create_pool(&DatabaseConfig {
        url: format!("postgres://postgres:postgres@{host}:{port}/postgres"),
        max_connections: 10,
        acquire_timeout_secs: 5,
    })
    .await
    .unwrap();

    let store = PgAccountStore::new(pool, TABLE).unwrap();
    store.ensure_schema().await.unwrap();
    (container, store)
}

fn account(username: &str, email: &str) -> Account {
    Account::new(username.to_string(), email.to_string(), "hash".to_string(), 0)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pg_conditional_put_enforces_both_keys() {
    let (_container, store) = start_store().await;
    let all = UniquenessCondition::AllUniqueKeysAbsent;

    assert_eq!(
        store.conditional_put(&account("alice", "a@example.com"), all).await.unwrap(),
        PutOutcome::Written
    );
    assert_eq!(
        store.conditional_put(&account("alice", "other@example.com"), all).await.unwrap(),
        PutOutcome::Conflict
    );
    assert_eq!(
        store.conditional_put(&account("bob", "a@example.com"), all).await.unwrap(),
        PutOutcome::Conflict
    );

    let by_email = store
        .query(&KeyQuery::new(AccountKey::Email, "a@example.com", Some("email")))
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0], account("alice", "a@example.com"));

    let missing = store
        .query(&KeyQuery::new(AccountKey::Username, "bob", None))
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires Docker"]
async fn test_pg_concurrent_signups_create_one_account() {
    let (_container, store) = start_store().await;
    let store = Arc::new(store);
    let hashing = HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    let service = Arc::new(RegistrationService::new(
        store.clone(),
        Arc::new(RuleTable::build().unwrap()),
        CredentialHasher::new(&hashing).unwrap(),
        "email",
        Arc::new(FixedClock::at_unix(1_705_322_096).unwrap()),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .register(RegistrationRequest {
                        username: format!("racer{i}"),
                        email: "race@example.com".to_string(),
                        password: "longenough1".to_string(),
                    })
                    .await
            })
        })
        .collect();

    let outcomes: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let created = outcomes
        .iter()
        .filter(|o| matches!(o, RegistrationOutcome::Created(_)))
        .count();
    assert_eq!(created, 1);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, RegistrationOutcome::Created(_) | RegistrationOutcome::Rejected(_))));

    let sharing = store
        .query(&KeyQuery::new(AccountKey::Email, "race@example.com", Some("email")))
        .await
        .unwrap();
    assert_eq!(sharing.len(), 1);
}
