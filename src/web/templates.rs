//! HTML rendering of the catalog pages

use std::fmt::Write;

use chrono::NaiveDate;
use validator::ValidationError;

use crate::{
    forms::RenewBookForm,
    models::{Author, BookDetails, BookInstance, BookShort},
    services::catalog::{AuthorDetails, CatalogCounts, Page},
    urls,
};

/// Escape text for inclusion in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | Local Library</title>
</head>
<body>
  <nav>
    <ul>
      <li><a href="{index}">Home</a></li>
      <li><a href="{books}">All books</a></li>
      <li><a href="{authors}">All authors</a></li>
      <li><a href="{mybooks}">My Borrowed</a></li>
      <li><a href="{borrowed}">All Borrowed</a></li>
      <li><a href="{login}">Login</a></li>
    </ul>
  </nav>
  <main>
{content}
  </main>
</body>
</html>
"#,
        title = escape(title),
        index = urls::INDEX,
        books = urls::BOOKS,
        authors = urls::AUTHORS,
        mybooks = urls::MY_BORROWED,
        borrowed = urls::ALL_BORROWED,
        login = urls::LOGIN,
        content = content,
    )
}

fn pagination<T>(page: &Page<T>, base: &str) -> String {
    if page.num_pages() <= 1 {
        return String::new();
    }

    let mut html = String::from("<div class=\"pagination\">");
    if page.has_previous() {
        let _ = write!(html, "<a href=\"{}?page={}\">previous</a> ", base, page.page - 1);
    }
    let _ = write!(html, "Page {} of {}.", page.page, page.num_pages());
    if page.has_next() {
        let _ = write!(html, " <a href=\"{}?page={}\">next</a>", base, page.page + 1);
    }
    html.push_str("</div>");
    html
}

fn due_back_cell(instance: &BookInstance, today: NaiveDate) -> String {
    match instance.due_back {
        Some(due_back) if instance.is_overdue_on(today) => {
            format!("<span class=\"text-danger\">{}</span>", due_back)
        }
        Some(due_back) => due_back.to_string(),
        None => String::new(),
    }
}

pub fn index(counts: &CatalogCounts) -> String {
    let content = format!(
        r#"<h1>Local Library Home</h1>
<p>Welcome to LocalLibrary.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
  <li><strong>Books:</strong> {}</li>
  <li><strong>Copies:</strong> {}</li>
  <li><strong>Copies available:</strong> {}</li>
  <li><strong>Authors:</strong> {}</li>
  <li><strong>Genres:</strong> {}</li>
</ul>"#,
        counts.num_books,
        counts.num_instances,
        counts.num_instances_available,
        counts.num_authors,
        counts.num_genres
    );
    layout("Home", &content)
}

pub fn book_list(page: &Page<BookShort>) -> String {
    let mut content = String::from("<h1>Book List</h1>\n");
    if page.items.is_empty() {
        content.push_str("<p>There are no books in the library.</p>");
    } else {
        content.push_str("<ul>\n");
        for book in &page.items {
            let _ = write!(
                content,
                "  <li><a href=\"{}\">{}</a>",
                urls::book_detail(book.id),
                escape(&book.title)
            );
            if let Some(author) = &book.author {
                let _ = write!(content, " ({})", escape(author));
            }
            content.push_str("</li>\n");
        }
        content.push_str("</ul>\n");
        content.push_str(&pagination(page, urls::BOOKS));
    }
    layout("All books", &content)
}

pub fn book_detail(details: &BookDetails, today: NaiveDate) -> String {
    let book = &details.book;
    let mut content = format!("<h1>Title: {}</h1>\n", escape(&book.title));

    if let Some(author) = &details.author {
        let _ = writeln!(
            content,
            "<p><strong>Author:</strong> <a href=\"{}\">{}</a></p>",
            author.get_absolute_url(),
            escape(&author.to_string())
        );
    }
    let _ = writeln!(content, "<p><strong>Summary:</strong> {}</p>", escape(&book.summary));
    let _ = writeln!(content, "<p><strong>ISBN:</strong> {}</p>", escape(&book.isbn));
    if let Some(language) = &details.language {
        let _ = writeln!(
            content,
            "<p><strong>Language:</strong> {}</p>",
            escape(&language.name)
        );
    }
    let _ = writeln!(
        content,
        "<p><strong>Genre:</strong> {}</p>",
        escape(&details.display_genre())
    );

    content.push_str("<div class=\"copies\">\n<h4>Copies</h4>\n");
    if details.instances.is_empty() {
        content.push_str("<p>There are no copies of this book.</p>\n");
    }
    for instance in &details.instances {
        let _ = write!(
            content,
            "<hr>\n<p class=\"status-{}\">{}</p>\n",
            instance.status.code(),
            instance.status
        );
        if instance.due_back.is_some() {
            let _ = writeln!(
                content,
                "<p><strong>Due to be returned:</strong> {}</p>",
                due_back_cell(instance, today)
            );
        }
        let _ = writeln!(
            content,
            "<p><strong>Imprint:</strong> {}</p>\n<p class=\"text-muted\"><strong>Id:</strong> {}</p>",
            escape(&instance.imprint),
            instance.id
        );
    }
    content.push_str("</div>");

    layout(&book.title, &content)
}

pub fn author_list(page: &Page<Author>) -> String {
    let mut content = String::from("<h1>Author List</h1>\n");
    if page.items.is_empty() {
        content.push_str("<p>There are no authors available.</p>");
    } else {
        content.push_str("<ul>\n");
        for author in &page.items {
            let _ = write!(
                content,
                "  <li><a href=\"{}\">{}</a>",
                author.get_absolute_url(),
                escape(&author.to_string())
            );
            if let Some(lifespan) = author.lifespan() {
                let _ = write!(content, " {}", lifespan);
            }
            content.push_str("</li>\n");
        }
        content.push_str("</ul>\n");
        content.push_str(&pagination(page, urls::AUTHORS));
    }
    layout("All authors", &content)
}

pub fn author_detail(details: &AuthorDetails) -> String {
    let author = &details.author;
    let mut content = format!("<h1>Author: {}</h1>\n", escape(&author.to_string()));
    if let Some(lifespan) = author.lifespan() {
        let _ = writeln!(content, "<p>{}</p>", lifespan);
    }

    content.push_str("<h4>Books</h4>\n");
    if details.books.is_empty() {
        content.push_str("<p>This author has no books.</p>");
    } else {
        content.push_str("<dl>\n");
        for book in &details.books {
            let _ = writeln!(
                content,
                "  <dt><a href=\"{}\">{}</a></dt>\n  <dd>{}</dd>",
                book.get_absolute_url(),
                escape(&book.title),
                escape(&book.summary)
            );
        }
        content.push_str("</dl>");
    }

    layout(&author.to_string(), &content)
}

/// Copies on loan; librarians also get a renewal link per copy
pub fn borrowed_list(
    title: &str,
    instances: &[BookInstance],
    today: NaiveDate,
    show_renew_links: bool,
) -> String {
    let mut content = format!("<h1>{}</h1>\n", escape(title));
    if instances.is_empty() {
        content.push_str("<p>There are no books borrowed.</p>");
        return layout(title, &content);
    }

    content.push_str("<ul>\n");
    for instance in instances {
        let class = if instance.is_overdue_on(today) {
            " class=\"text-danger\""
        } else {
            ""
        };
        let _ = write!(
            content,
            "  <li{}><a href=\"{}\">{}</a> ({})",
            class,
            urls::book_detail(instance.book_id),
            escape(&instance.book_title),
            due_back_cell(instance, today)
        );
        if show_renew_links {
            let _ = write!(
                content,
                " - <a href=\"{}\">Renew</a>",
                urls::renew_book_librarian(instance.id)
            );
        }
        content.push_str("</li>\n");
    }
    content.push_str("</ul>");

    layout(title, &content)
}

/// Renewal form, with the field error when a submission was refused
pub fn renew_book(
    instance: &BookInstance,
    form: &RenewBookForm,
    error: Option<&ValidationError>,
    max_weeks: i64,
) -> String {
    let mut content = format!(
        "<h1>Renew: {}</h1>\n<p>Borrower due date: {}</p>\n",
        escape(&instance.book_title),
        instance
            .due_back
            .map(|d| d.to_string())
            .unwrap_or_default()
    );

    let _ = write!(
        content,
        r#"<form action="{action}" method="post">
  <label for="id_renewal_date">Renewal date:</label>
  <input type="date" name="renewal_date" value="{value}" id="id_renewal_date" required>
  <span class="helptext">Enter a date between now and {max_weeks} weeks (default 3).</span>
"#,
        action = urls::renew_book_librarian(instance.id),
        value = escape(&form.renewal_date),
        max_weeks = max_weeks,
    );

    if let Some(error) = error {
        let message = error
            .message
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| error.code.to_string());
        let _ = writeln!(
            content,
            "  <ul class=\"errorlist\"><li>{}</li></ul>",
            escape(&message)
        );
    }

    content.push_str("  <input type=\"submit\" value=\"Submit\">\n</form>");

    layout("Renew book", &content)
}

pub fn login(next: Option<&str>, error: Option<&str>) -> String {
    let mut content = String::from("<h1>Login</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(content, "<p class=\"errornote\">{}</p>", escape(error));
    }
    let _ = write!(
        content,
        r#"<form method="post" action="{action}">
  <label for="id_username">Username:</label>
  <input type="text" name="username" id="id_username" required>
  <label for="id_password">Password:</label>
  <input type="password" name="password" id="id_password" required>
  <input type="hidden" name="next" value="{next}">
  <input type="submit" value="login">
</form>"#,
        action = urls::LOGIN,
        next = escape(next.unwrap_or(urls::INDEX)),
    );
    layout("Login", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoanStatus;
    use chrono::Duration;
    use uuid::Uuid;

    fn instance(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: 2,
            book_title: "The Shining".to_string(),
            imprint: "2nd".to_string(),
            due_back,
            status: LoanStatus::OnLoan,
            borrower_id: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_renew_form_shows_error_message() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let form = RenewBookForm::proposing(today - Duration::days(1));
        let error = form.clean_renewal_date(today, 4).unwrap_err();

        let html = renew_book(&instance(Some(today)), &form, Some(&error), 4);
        assert!(html.contains("Invalid date - renewal in past"));
        assert!(html.contains("value=\"2024-06-09\""));

        let html = renew_book(&instance(Some(today)), &form, None, 4);
        assert!(!html.contains("errorlist"));
    }

    #[test]
    fn test_borrowed_list_flags_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let overdue = instance(Some(today - Duration::days(2)));
        let html = borrowed_list("All Borrowed", &[overdue.clone()], today, true);

        assert!(html.contains("text-danger"));
        assert!(html.contains(&urls::renew_book_librarian(overdue.id)));

        let html = borrowed_list("Borrowed books", &[instance(Some(today))], today, false);
        assert!(!html.contains("text-danger"));
        assert!(!html.contains("Renew</a>"));
    }
}
