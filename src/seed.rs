//! Baseline catalog data for demos and tests
//!
//! `clean_db` wipes every catalog row, `populate` recreates genres, languages,
//! authors, books and copies. Each `create_*` step looks up what the previous
//! steps inserted by name, so the steps may also be run one at a time.

use chrono::{Duration, Local};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::CreateAuthor, book::CreateBook, book_instance::CreateBookInstance, Author, Book,
        BookInstance, Genre, Language, LoanStatus,
    },
    repository::Repository,
};

const GENRES: [&str; 5] = [
    "Fantasy",
    "Science Fiction",
    "Horror",
    "Mystery",
    "French Poetry",
];

const LANGUAGES: [&str; 3] = ["English", "Spanish", "French"];

/// (first name, last name)
const AUTHORS: [(&str, &str); 4] = [
    ("Isaac", "Asimov"),
    ("Stephen", "King"),
    ("Ursula", "Le Guin"),
    ("Agatha", "Christie"),
];

struct SeedBook {
    title: &'static str,
    author: (&'static str, &'static str),
    summary: &'static str,
    isbn: &'static str,
    language: &'static str,
    genres: &'static [&'static str],
}

const BOOKS: [SeedBook; 5] = [
    SeedBook {
        title: "I, Robot",
        author: ("Isaac", "Asimov"),
        summary: "Nine stories tracing the development of robots and the Three Laws.",
        isbn: "9780553382563",
        language: "English",
        genres: &["Science Fiction"],
    },
    SeedBook {
        title: "Foundation",
        author: ("Isaac", "Asimov"),
        summary: "A mathematician foresees the fall of the Galactic Empire.",
        isbn: "9780553293357",
        language: "English",
        genres: &["Science Fiction"],
    },
    SeedBook {
        title: "The Shining",
        author: ("Stephen", "King"),
        summary: "A winter caretaker and his family at the Overlook Hotel.",
        isbn: "9780307743657",
        language: "English",
        genres: &["Horror"],
    },
    SeedBook {
        title: "A Wizard of Earthsea",
        author: ("Ursula", "Le Guin"),
        summary: "A young mage unleashes a shadow and must hunt it down.",
        isbn: "9780547773742",
        language: "English",
        genres: &["Fantasy"],
    },
    SeedBook {
        title: "Murder on the Orient Express",
        author: ("Agatha", "Christie"),
        summary: "Hercule Poirot investigates a murder aboard a snowbound train.",
        isbn: "9780062693662",
        language: "English",
        genres: &["Mystery"],
    },
];

/// (book title, imprint, status, due in days when on loan)
const INSTANCES: [(&str, &str, LoanStatus, Option<i64>); 7] = [
    ("I, Robot", "Gnome Press, 1950", LoanStatus::Available, None),
    ("I, Robot", "Bantam Spectra, 2004", LoanStatus::OnLoan, Some(7)),
    ("Foundation", "Gnome Press, 1951", LoanStatus::OnLoan, Some(-3)),
    ("The Shining", "Doubleday, 1977", LoanStatus::Available, None),
    ("The Shining", "Anchor, 2012", LoanStatus::Maintenance, None),
    ("A Wizard of Earthsea", "Parnassus Press, 1968", LoanStatus::Reserved, None),
    ("Murder on the Orient Express", "Collins Crime Club, 1934", LoanStatus::OnLoan, Some(14)),
];

/// Delete every catalog row; running it on an empty database is a no-op
pub async fn clean_db(repository: &Repository) -> AppResult<()> {
    let instances = repository.book_instances.delete_all().await?;
    let books = repository.books.delete_all().await?;
    let authors = repository.authors.delete_all().await?;
    let genres = repository.genres.delete_all().await?;
    let languages = repository.languages.delete_all().await?;

    tracing::info!(
        "Cleaned catalog: {} instances, {} books, {} authors, {} genres, {} languages",
        instances,
        books,
        authors,
        genres,
        languages
    );
    Ok(())
}

pub async fn create_genres(repository: &Repository) -> AppResult<Vec<Genre>> {
    let mut genres = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = match repository.genres.find_by_name(name).await? {
            Some(existing) => existing,
            None => repository.genres.create(name).await?,
        };
        genres.push(genre);
    }
    Ok(genres)
}

pub async fn create_languages(repository: &Repository) -> AppResult<Vec<Language>> {
    let mut languages = Vec::with_capacity(LANGUAGES.len());
    for name in LANGUAGES {
        let language = match repository.languages.find_by_name(name).await? {
            Some(existing) => existing,
            None => repository.languages.create(name).await?,
        };
        languages.push(language);
    }
    Ok(languages)
}

pub async fn create_authors(repository: &Repository) -> AppResult<Vec<Author>> {
    let mut authors = Vec::with_capacity(AUTHORS.len());
    for (first_name, last_name) in AUTHORS {
        let author = match repository.authors.find_by_name(first_name, last_name).await? {
            Some(existing) => existing,
            None => {
                repository
                    .authors
                    .create(&CreateAuthor::new(first_name, last_name))
                    .await?
            }
        };
        authors.push(author);
    }
    Ok(authors)
}

/// Books of the seed authors; missing authors, genres or languages are created
pub async fn create_books(repository: &Repository) -> AppResult<Vec<Book>> {
    let mut books = Vec::with_capacity(BOOKS.len());
    for seed in &BOOKS {
        if let Some(existing) = repository.books.find_by_title(seed.title).await? {
            books.push(existing);
            continue;
        }

        let (first_name, last_name) = seed.author;
        let author = match repository.authors.find_by_name(first_name, last_name).await? {
            Some(author) => author,
            None => {
                repository
                    .authors
                    .create(&CreateAuthor::new(first_name, last_name))
                    .await?
            }
        };
        let language = match repository.languages.find_by_name(seed.language).await? {
            Some(language) => language,
            None => repository.languages.create(seed.language).await?,
        };
        let mut genre_ids = Vec::with_capacity(seed.genres.len());
        for name in seed.genres {
            let genre = match repository.genres.find_by_name(name).await? {
                Some(genre) => genre,
                None => repository.genres.create(name).await?,
            };
            genre_ids.push(genre.id);
        }

        let book = repository
            .books
            .create(&CreateBook {
                title: seed.title.to_string(),
                author_id: Some(author.id),
                summary: seed.summary.to_string(),
                isbn: seed.isbn.to_string(),
                language_id: Some(language.id),
                genre_ids,
            })
            .await?;
        books.push(book);
    }
    Ok(books)
}

/// Copies of the seed books; on-loan copies get a due date around today
pub async fn create_book_instances(repository: &Repository) -> AppResult<Vec<BookInstance>> {
    let today = Local::now().date_naive();
    let mut instances = Vec::with_capacity(INSTANCES.len());

    for (title, imprint, status, due_in_days) in INSTANCES {
        let book = repository.books.find_by_title(title).await?.ok_or_else(|| {
            AppError::NotFound(format!("Seed book '{}' missing, run create_books first", title))
        })?;

        let instance = repository
            .book_instances
            .create(&CreateBookInstance {
                book_id: book.id,
                imprint: imprint.to_string(),
                due_back: due_in_days.map(|days| today + Duration::days(days)),
                status,
                borrower_id: None,
            })
            .await?;
        instances.push(instance);
    }
    Ok(instances)
}

/// Run every creation step in order
pub async fn populate(repository: &Repository) -> AppResult<()> {
    let genres = create_genres(repository).await?;
    let languages = create_languages(repository).await?;
    let authors = create_authors(repository).await?;
    let books = create_books(repository).await?;
    let instances = create_book_instances(repository).await?;

    tracing::info!(
        "Populated catalog: {} genres, {} languages, {} authors, {} books, {} instances",
        genres.len(),
        languages.len(),
        authors.len(),
        books.len(),
        instances.len()
    );
    Ok(())
}
