//! Database migration tests
//!
//! Tests to ensure migrations run correctly and database schema is valid

use crate::common::*;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = TestDatabase::new().await;

    let result = db.storage().migrate().await;

    assert!(result.is_ok(), "Re-running migrations should be a no-op");
}

#[tokio::test]
async fn test_tables_exist() {
    let db = TestDatabase::new().await;

    for table in ["users", "books", "votes"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .execute(db.storage().pool())
            .await;
        assert!(result.is_ok(), "{} table should exist", table);
    }
}

#[tokio::test]
async fn test_counters_cannot_go_negative() {
    let db = TestDatabase::new().await;
    let book = seed_book(db.storage(), "Dune").await;

    let result = sqlx::query("UPDATE books SET likes = likes - 1 WHERE id = ?")
        .bind(book)
        .execute(db.storage().pool())
        .await;

    assert_err!(result);
}

#[tokio::test]
async fn test_one_vote_row_per_user_and_book() {
    let db = TestDatabase::new().await;
    let book = seed_book(db.storage(), "Dune").await;
    let insert = "INSERT INTO votes (user_id, book_id, action, updated_at) VALUES (1, ?, ?, '2024-01-01T00:00:00Z')";

    assert_ok!(sqlx::query(insert).bind(book).bind("like").execute(db.storage().pool()).await);
    let duplicate = sqlx::query(insert).bind(book).bind("dislike").execute(db.storage().pool()).await;

    assert_err!(duplicate, sqlx::Error::Database(_));
}

#[tokio::test]
async fn test_vote_action_is_constrained() {
    let db = TestDatabase::new().await;
    let book = seed_book(db.storage(), "Dune").await;

    let result = sqlx::query(
        "INSERT INTO votes (user_id, book_id, action, updated_at) VALUES (1, ?, 'meh', '2024-01-01T00:00:00Z')",
    )
    .bind(book)
    .execute(db.storage().pool())
    .await;

    assert_err!(result);
}

#[tokio::test]
async fn test_deleting_a_book_cascades_to_votes() {
    let db = TestDatabase::new().await;
    let book = seed_book(db.storage(), "Dune").await;
    sqlx::query("INSERT INTO votes (user_id, book_id, action, updated_at) VALUES (1, ?, 'like', '2024-01-01T00:00:00Z')")
        .bind(book)
        .execute(db.storage().pool())
        .await
        .unwrap();

    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(book)
        .execute(db.storage().pool())
        .await
        .unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes")
        .fetch_one(db.storage().pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
