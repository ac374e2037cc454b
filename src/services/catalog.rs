//! Catalog browsing and management service

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::CreateAuthor,
        book::CreateBook,
        book_instance::CreateBookInstance,
        Author, Book, BookDetails, BookInstance, BookShort, LoanStatus,
    },
    repository::Repository,
};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
}

/// One page of a list view
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    /// 1-based page number
    pub page: i64,
    pub per_page: i64,
}

impl<T> Page<T> {
    pub fn num_pages(&self) -> i64 {
        ((self.total + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }
}

/// Author with the books they wrote
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.book_instances.count().await?,
            num_instances_available: self
                .repository
                .book_instances
                .count_with_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.genres.count().await?,
        })
    }

    /// List books, `page` is 1-based
    pub async fn list_books(&self, page: i64) -> AppResult<Page<BookShort>> {
        let total = self.repository.books.count().await?;
        let (limit, offset) = self.page_window(page, total)?;
        let items = self.repository.books.list_short(limit, offset).await?;
        Ok(Page {
            items,
            total,
            page,
            per_page: limit,
        })
    }

    /// List authors, `page` is 1-based
    pub async fn list_authors(&self, page: i64) -> AppResult<Page<Author>> {
        let total = self.repository.authors.count().await?;
        let (limit, offset) = self.page_window(page, total)?;
        let items = self.repository.authors.list(limit, offset).await?;
        Ok(Page {
            items,
            total,
            page,
            per_page: limit,
        })
    }

    /// Get a book with its author, language, genres and copies
    pub async fn get_book(&self, id: i64) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;

        let author = match book.author_id {
            Some(author_id) => Some(self.repository.authors.get_by_id(author_id).await?),
            None => None,
        };
        let language = match book.language_id {
            Some(language_id) => Some(self.repository.languages.get_by_id(language_id).await?),
            None => None,
        };
        let genres = self.repository.genres.list_for_book(id).await?;
        let instances = self.repository.book_instances.list_for_book(id).await?;

        Ok(BookDetails {
            book,
            author,
            language,
            genres,
            instances,
        })
    }

    pub async fn get_author(&self, id: i64) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.books.list_by_author(id).await?;
        Ok(AuthorDetails { author, books })
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author.validate()?;
        let created = self.repository.authors.create(&author).await?;
        tracing::info!("Created author {} ({})", created.id, created);
        Ok(created)
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = book.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        for genre_id in &book.genre_ids {
            self.repository.genres.get_by_id(*genre_id).await?;
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Created book {} ({})", created.id, created);
        Ok(created)
    }

    pub async fn create_book_instance(
        &self,
        instance: CreateBookInstance,
    ) -> AppResult<BookInstance> {
        self.repository.books.get_by_id(instance.book_id).await?;
        if let Some(borrower_id) = instance.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }

        let created = self.repository.book_instances.create(&instance).await?;
        tracing::info!("Created book instance {}", created);
        Ok(created)
    }

    pub async fn get_book_instance(&self, id: uuid::Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    /// (limit, offset) of a 1-based page; pages past the end do not exist
    fn page_window(&self, page: i64, total: i64) -> AppResult<(i64, i64)> {
        let per_page = self.config.paginate_by.max(1);
        let last_page = ((total + per_page - 1) / per_page).max(1);
        if page < 1 || page > last_page {
            return Err(AppError::NotFound(format!("Invalid page {}", page)));
        }
        Ok((per_page, (page - 1) * per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: i64, page: i64) -> Page<()> {
        Page {
            items: vec![],
            total,
            page,
            per_page: 10,
        }
    }

    #[test]
    fn test_page_navigation() {
        assert_eq!(page(0, 1).num_pages(), 1);
        assert!(!page(0, 1).has_next());
        assert_eq!(page(25, 1).num_pages(), 3);
        assert!(page(25, 1).has_next());
        assert!(!page(25, 1).has_previous());
        assert!(page(25, 3).has_previous());
        assert!(!page(25, 3).has_next());
    }
}
