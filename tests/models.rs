//! Model behaviour against a real database: display, URLs, genres and overdue

mod common;

use common::{days_from_today, today, CatalogFixture, TestApp};
use locallibrary_server::models::LoanStatus;

async fn robot_fixture(app: &TestApp) -> CatalogFixture {
    CatalogFixture::create(
        app,
        "Sci-Fi",
        "English",
        ("Isaac", "Asimov"),
        "I, Robot",
        "1234567890123",
    )
    .await
}

#[tokio::test]
async fn test_genre_and_language_display() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    assert_eq!(fixture.genre.to_string(), "Sci-Fi");
    assert_eq!(fixture.language.to_string(), "English");
}

#[tokio::test]
async fn test_book_display_and_genres() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    assert_eq!(fixture.book.to_string(), "I, Robot");

    let details = app
        .state
        .services
        .catalog
        .get_book(fixture.book.id)
        .await
        .unwrap();
    assert!(details.display_genre().contains("Sci-Fi"));
    assert_eq!(details.author.as_ref(), Some(&fixture.author));
    assert_eq!(details.language.as_ref(), Some(&fixture.language));
}

#[tokio::test]
async fn test_display_genre_shows_first_three() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    for name in ["Adventure", "Classics", "Robots"] {
        let genre = app.repository.genres.create(name).await.unwrap();
        app.repository
            .books
            .add_genre(fixture.book.id, genre.id)
            .await
            .unwrap();
    }
    // Linking twice is a no-op
    app.repository
        .books
        .add_genre(fixture.book.id, fixture.genre.id)
        .await
        .unwrap();

    let details = app
        .state
        .services
        .catalog
        .get_book(fixture.book.id)
        .await
        .unwrap();
    assert_eq!(details.genres.len(), 4);
    assert_eq!(details.display_genre(), "Adventure, Classics, Robots");
}

#[tokio::test]
async fn test_author_display_and_url() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    assert_eq!(fixture.author.to_string(), "Asimov, Isaac");

    let url = fixture.author.get_absolute_url();
    assert!(url.starts_with("/catalog/author/"));
    assert!(url.ends_with('/'));
    assert_eq!(url, format!("/catalog/author/{}/", fixture.author.id));
}

#[tokio::test]
async fn test_book_instance_is_overdue() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    let inst_ok = fixture
        .add_instance(&app, "1st", Some(days_from_today(1)), LoanStatus::OnLoan)
        .await;
    let inst_over = fixture
        .add_instance(&app, "1st", Some(days_from_today(-1)), LoanStatus::OnLoan)
        .await;
    let inst_today = fixture
        .add_instance(&app, "1st", Some(today()), LoanStatus::OnLoan)
        .await;
    let inst_undated = fixture
        .add_instance(&app, "1st", None, LoanStatus::Available)
        .await;

    assert!(!inst_ok.is_overdue());
    assert!(inst_over.is_overdue());
    assert!(!inst_today.is_overdue());
    assert!(!inst_undated.is_overdue());
}

#[tokio::test]
async fn test_book_instance_display_contains_title() {
    let app = TestApp::new().await;
    let fixture = robot_fixture(&app).await;

    let inst = fixture
        .add_instance(&app, "1st", Some(today()), LoanStatus::Available)
        .await;
    assert!(inst.to_string().contains("I, Robot"));

    let reloaded = app
        .repository
        .book_instances
        .get_by_id(inst.id)
        .await
        .unwrap();
    assert_eq!(reloaded, inst);
    assert_eq!(reloaded.status, LoanStatus::Available);
}

#[tokio::test]
async fn test_duplicate_genre_rejected() {
    let app = TestApp::new().await;
    robot_fixture(&app).await;

    let result = app.repository.genres.create("Sci-Fi").await;
    assert!(matches!(
        result,
        Err(locallibrary_server::AppError::Conflict(_))
    ));
}
