//! Reverse routing: paths of the named catalog pages

use uuid::Uuid;

pub const INDEX: &str = "/catalog/";
pub const BOOKS: &str = "/catalog/books/";
pub const AUTHORS: &str = "/catalog/authors/";
pub const MY_BORROWED: &str = "/catalog/mybooks/";
pub const ALL_BORROWED: &str = "/catalog/borrowed/";
pub const LOGIN: &str = "/accounts/login/";
pub const LOGOUT: &str = "/accounts/logout/";

pub fn book_detail(id: i64) -> String {
    format!("/catalog/book/{}/", id)
}

pub fn author_detail(id: i64) -> String {
    format!("/catalog/author/{}/", id)
}

pub fn renew_book_librarian(instance_id: Uuid) -> String {
    format!("/catalog/book/{}/renew/", instance_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_paths() {
        assert_eq!(book_detail(12), "/catalog/book/12/");
        assert_eq!(author_detail(4), "/catalog/author/4/");

        let id = Uuid::nil();
        assert_eq!(
            renew_book_librarian(id),
            "/catalog/book/00000000-0000-0000-0000-000000000000/renew/"
        );
    }
}
