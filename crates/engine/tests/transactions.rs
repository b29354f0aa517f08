use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{AmountField, Engine, EngineError, TransactionDraft, TransactionKind};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

fn fields(amount: &str, kind: &str, category: &str, note: Option<&str>) -> engine::NewTransaction {
    TransactionDraft {
        amount: Some(AmountField::Text(amount.to_string())),
        kind: Some(kind.to_string()),
        category: Some(category.to_string()),
        note: note.map(ToString::to_string),
    }
    .validate()
    .unwrap()
}

#[tokio::test]
async fn created_transaction_shows_up_exactly_once() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction("alice", fields("12.50", "expense", "Food", Some("lunch")))
        .await
        .unwrap();

    assert_eq!(created.user_id, "alice");
    assert_eq!(created.amount_minor, 1250);

    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn list_is_scoped_to_the_owner() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_transaction("alice", fields("10", "income", "Salary", None))
        .await
        .unwrap();
    engine
        .create_transaction("bob", fields("99", "expense", "Rent", None))
        .await
        .unwrap();

    let alice = engine.list_transactions("alice").await.unwrap();
    assert_eq!(alice.len(), 1);
    assert!(alice.iter().all(|tx| tx.user_id == "alice"));

    let nobody = engine.list_transactions("carol").await.unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn list_orders_newest_first() {
    let (engine, _db) = engine_with_db().await;

    for amount in ["1", "2", "3"] {
        engine
            .create_transaction("alice", fields(amount, "expense", "Food", None))
            .await
            .unwrap();
    }

    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed.len(), 3);
    for pair in listed.windows(2) {
        assert!(
            pair[0].created_at > pair[1].created_at
                || (pair[0].created_at == pair[1].created_at && pair[0].id > pair[1].id)
        );
    }
}

#[tokio::test]
async fn update_mutates_fields_but_not_identity() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction("alice", fields("20", "expense", "Food", Some("old")))
        .await
        .unwrap();

    let updated = engine
        .update_transaction("alice", created.id, fields("35.25", "income", "Refund", None))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, created.user_id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.amount_minor, 3525);
    assert_eq!(updated.kind, TransactionKind::Income);
    assert_eq!(updated.category, "Refund");
    assert_eq!(updated.note, None);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .update_transaction("alice", Uuid::new_v4(), fields("1", "income", "Pay", None))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn update_of_foreign_transaction_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction("alice", fields("20", "expense", "Food", None))
        .await
        .unwrap();

    let err = engine
        .update_transaction("bob", created.id, fields("1", "income", "Pay", None))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // Untouched for the owner.
    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn delete_removes_and_second_delete_fails() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction("alice", fields("20", "expense", "Food", None))
        .await
        .unwrap();

    engine.delete_transaction("alice", created.id).await.unwrap();
    assert!(engine.list_transactions("alice").await.unwrap().is_empty());

    let err = engine
        .delete_transaction("alice", created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_of_foreign_transaction_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .create_transaction("alice", fields("20", "expense", "Food", None))
        .await
        .unwrap();

    let err = engine
        .delete_transaction("bob", created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    assert_eq!(engine.list_transactions("alice").await.unwrap().len(), 1);
}
