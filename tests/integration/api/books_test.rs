//! Catalog API tests
//!
//! Listing, search, admin book management, uploads and downloads

use axum::http::{header, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use bookshelf::shared::{Book, BookPage};
use serde_json::json;

use crate::common::*;

fn book_form(title: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("author", "Frank Herbert")
        .add_text("description", "Desert planet politics")
        .add_text("genres", r#"["Science Fiction","Classic"]"#)
        .add_text("summary", "Spice must flow")
}

fn png(name: &str, len: usize) -> Part {
    Part::bytes(vec![0u8; len]).file_name(name).mime_type("image/png")
}

async fn only_book(app: &TestApp) -> Book {
    let page: BookPage = app.server.get("/books").await.json();
    assert_eq!(page.total, 1);
    page.books.into_iter().next().expect("one book")
}

#[tokio::test]
async fn test_list_books_paginates_and_filters() {
    let app = TestApp::spawn().await;
    for i in 0..12 {
        seed_book(&app.storage, &format!("Volume {:02}", i)).await;
    }
    seed_book(&app.storage, "Emma").await;

    let first: BookPage = app.server.get("/books").await.json();
    assert_eq!(first.books.len(), 10);
    assert_eq!(first.total, 13);

    let second: BookPage = app.server.get("/books?page=2&limit=10").await.json();
    assert_eq!(second.books.len(), 3);

    let filtered: BookPage = app.server.get("/books?title=volume").await.json();
    assert_eq!(filtered.total, 12);

    let lenient: BookPage = app.server.get("/books?page=abc&limit=-4").await.json();
    assert_eq!(lenient.books.len(), 10);
}

#[tokio::test]
async fn test_search_books() {
    let app = TestApp::spawn().await;
    seed_book(&app.storage, "Dune").await;
    seed_book(&app.storage, "100% Pure").await;

    let dune: Vec<Book> = app.server.get("/books/search?query=dun").await.json();
    assert_eq!(dune.len(), 1);
    assert_eq!(dune[0].title, "Dune");

    let by_author: Vec<Book> = app.server.get("/books/search?query=test%20author").await.json();
    assert_eq!(by_author.len(), 2);

    let percent: Vec<Book> = app.server.get("/books/search?query=%25").await.json();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% Pure");
}

#[tokio::test]
async fn test_get_book() {
    let app = TestApp::spawn().await;
    let id = seed_book(&app.storage, "Dune").await;

    let response = app.server.get(&format!("/books/{}", id)).await;
    assert_status!(response, StatusCode::OK);
    let book: Book = response.json();
    assert_eq!(book.title, "Dune");
    assert_eq!((book.likes, book.dislikes), (0, 0));

    let missing = app.server.get("/books/9999").await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_book_with_files_and_download() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;

    let form = book_form("Dune")
        .add_part("bookCover", png("cover.png", 1024))
        .add_part(
            "bookFile",
            Part::bytes(b"%PDF-1.4 dune".to_vec())
                .file_name("dune.pdf")
                .mime_type("application/pdf"),
        );
    let response = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(form)
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "Book added successfully");

    let book = only_book(&app).await;
    assert_eq!(book.genres, vec!["Science Fiction".to_string(), "Classic".to_string()]);
    let stored = book.file.expect("stored book file");
    assert!(stored.ends_with("-dune.pdf"));
    assert!(app.upload_path(&stored).is_file());
    assert!(app.upload_path(&book.cover.expect("stored cover")).is_file());

    let download = app.server.get(&format!("/download/{}", stored)).await;
    assert_status!(download, StatusCode::OK);
    assert_eq!(&download.as_bytes()[..], b"%PDF-1.4 dune");
    let disposition = download.header(header::CONTENT_DISPOSITION);
    assert_eq!(disposition.to_str().unwrap(), r#"attachment; filename="dune.pdf""#);
}

#[tokio::test]
async fn test_add_book_rejects_bad_input() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;

    let missing = MultipartForm::new()
        .add_text("title", "Dune")
        .add_text("genres", r#"["Classic"]"#);
    let response = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(missing)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Missing required fields");

    let bad_genres = MultipartForm::new()
        .add_text("title", "Dune")
        .add_text("author", "Frank Herbert")
        .add_text("description", "Desert")
        .add_text("genres", "Science Fiction");
    let response = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(bad_genres)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid genres format");

    let not_an_image = book_form("Dune").add_part(
        "bookCover",
        Part::bytes(b"plain".to_vec()).file_name("cover.txt").mime_type("text/plain"),
    );
    let response = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(not_an_image)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Only image files are allowed for book covers");

    let too_large = book_form("Dune").add_part("bookCover", png("huge.png", 2 * 1024 * 1024 + 1));
    let response = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(too_large)
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_contains!(response.text(), "Maximum size for book covers is 2 MB");

    let page: BookPage = app.server.get("/books").await.json();
    assert_eq!(page.total, 0);
    let leftovers = std::fs::read_dir(&app.config.upload_dir).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_book_management_requires_admin() {
    let app = TestApp::spawn().await;
    let reader = create_unique_test_user(&app).await;
    let id = seed_book(&app.storage, "Dune").await;

    let add = app
        .server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, reader.bearer())
        .multipart(book_form("Emma"))
        .await;
    assert_status!(add, StatusCode::FORBIDDEN);

    let delete = app
        .server
        .delete(&format!("/books/{}", id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(delete, StatusCode::FORBIDDEN);

    let anonymous = app.server.delete(&format!("/books/{}", id)).await;
    assert_status!(anonymous, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_edit_book_keeps_votes() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;
    let reader = create_unique_test_user(&app).await;
    let id = seed_book(&app.storage, "Dune").await;
    app.server
        .post(&format!("/books/{}/like", id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;

    let response = app
        .server
        .put(&format!("/books/{}", id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({
            "title": "Dune Messiah",
            "author": "Frank Herbert",
            "genres": ["Science Fiction"],
            "description": "The sequel"
        }))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "Book edited successfully");

    let book: Book = app.server.get(&format!("/books/{}", id)).await.json();
    assert_eq!(book.title, "Dune Messiah");
    assert_eq!(book.likes, 1);

    let missing = app
        .server
        .put("/books/9999")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .json(&json!({ "title": "X", "author": "Y", "description": "Z" }))
        .await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book_removes_votes_and_files() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;
    let reader = create_unique_test_user(&app).await;

    app.server
        .post("/addBook")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .multipart(book_form("Dune").add_part("bookCover", png("cover.png", 64)))
        .await;
    let book = only_book(&app).await;
    let cover = book.cover.expect("stored cover");
    app.server
        .post(&format!("/books/{}/like", book.id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;

    let response = app
        .server
        .delete(&format!("/books/{}", book.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "Book deleted successfully");

    assert!(!app.upload_path(&cover).exists());
    let votes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE book_id = ?")
        .bind(book.id)
        .fetch_one(app.storage.pool())
        .await
        .unwrap();
    assert_eq!(votes, 0);

    let again = app
        .server
        .delete(&format!("/books/{}", book.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(again, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_rejects_unknown_and_traversal() {
    let app = TestApp::spawn().await;
    std::fs::write(app.root().join("secret.txt"), "top secret").unwrap();

    let missing = app.server.get("/download/nothing-here.pdf").await;
    assert_status!(missing, StatusCode::NOT_FOUND);

    let traversal = app.server.get("/download/..%2Fsecret.txt").await;
    assert_status!(traversal, StatusCode::NOT_FOUND);
    assert_eq!(traversal.text(), "File not found");
}

#[tokio::test]
async fn test_uploads_and_public_files_are_served() {
    let app = TestApp::spawn().await;
    std::fs::write(app.upload_path("plain-cover.png"), b"png bytes").unwrap();

    let upload = app.server.get("/uploads/plain-cover.png").await;
    assert_status!(upload, StatusCode::OK);
    assert_eq!(&upload.as_bytes()[..], b"png bytes");

    let index = app.server.get("/index.html").await;
    assert_status!(index, StatusCode::OK);
    assert_contains!(index.text(), "Bookshelf");
}
