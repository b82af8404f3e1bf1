use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal used in the book file for an absent borrower or borrow date.
pub const ABSENT: &str = "None";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("{0} must contain only digits")]
    NotNumeric(&'static str),
    #[error("{0} cannot contain commas or line breaks")]
    Separator(&'static str),
    #[error("{0} cannot be the reserved word `None`")]
    Reserved(&'static str),
    #[error("unknown book status: {0}")]
    UnknownStatus(String),
}

/// Whether a book is on the shelf or out with a borrower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Issued" => Ok(BookStatus::Issued),
            other => Err(FieldError::UnknownStatus(other.to_string())),
        }
    }
}

/// A book held by the library.
///
/// `borrower` and `borrow_date` are set together, and only while the book
/// is [`BookStatus::Issued`]. The fields are private so that the pair can
/// only change through [`Book::issue_to`] and [`Book::mark_returned`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: String,
    status: BookStatus,
    borrower: Option<String>,
    borrow_date: Option<NaiveDateTime>,
}

impl Book {
    /// Creates an available book after validating every field.
    ///
    /// Returns [`FieldError`] if the title or author is empty, the year is
    /// not made of ASCII digits, or any field contains the record separator.
    pub fn new(title: &str, author: &str, year: &str) -> Result<Book, FieldError> {
        Ok(Book {
            title: valid_text("title", title)?,
            author: valid_text("author", author)?,
            year: valid_year(year)?,
            status: BookStatus::Available,
            borrower: None,
            borrow_date: None,
        })
    }

    /// Rebuilds a book from stored parts.
    ///
    /// Used by the persistence layer. Returns `None` if the status does not
    /// agree with the presence of the borrower and borrow date.
    pub fn from_parts(
        title: String,
        author: String,
        year: String,
        status: BookStatus,
        loan: Option<(String, NaiveDateTime)>,
    ) -> Option<Book> {
        match (status, loan) {
            (BookStatus::Available, None) => Some(Book {
                title,
                author,
                year,
                status,
                borrower: None,
                borrow_date: None,
            }),
            (BookStatus::Issued, Some((borrower, date))) => Some(Book {
                title,
                author,
                year,
                status,
                borrower: Some(borrower),
                borrow_date: Some(date),
            }),
            _ => None,
        }
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    pub fn borrower(&self) -> Option<&str> {
        self.borrower.as_deref()
    }

    pub fn borrow_date(&self) -> Option<NaiveDateTime> {
        self.borrow_date
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Case-insensitive title comparison used by every lookup.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Returns true if `student` currently holds this book (exact match).
    pub fn is_held_by(&self, student: &str) -> bool {
        self.borrower.as_deref() == Some(student)
    }

    pub(crate) fn issue_to(&mut self, student: &str, at: NaiveDateTime) {
        self.status = BookStatus::Issued;
        self.borrower = Some(student.to_owned());
        self.borrow_date = Some(at);
    }

    pub(crate) fn mark_returned(&mut self) {
        self.status = BookStatus::Available;
        self.borrower = None;
        self.borrow_date = None;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, Year: {}, Status: {}",
            self.title, self.author, self.year, self.status
        )
    }
}

/// An administrator credential pair. Surrounding whitespace is trimmed on
/// creation; comparison is otherwise exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub username: String,
    pub password: String,
}

impl Admin {
    /// Creates an admin pair. Both parts must be non-empty and free of
    /// the record separator.
    pub fn new(username: &str, password: &str) -> Result<Admin, FieldError> {
        Ok(Admin {
            username: valid_text("username", username)?,
            password: valid_text("password", password)?,
        })
    }
}

/// Validates a free-text field.
///
/// Trims surrounding whitespace, which the book file does not keep, then
/// ensures the value is not empty and has no `,`, `\n` or `\r`.
pub fn valid_text(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FieldError::Empty(field));
    }

    if trimmed.contains(&[',', '\n', '\r'][..]) {
        return Err(FieldError::Separator(field));
    }

    Ok(trimmed.to_owned())
}

/// Validates a publication year: one or more ASCII digits, surrounding
/// whitespace ignored.
pub fn valid_year(year: &str) -> Result<String, FieldError> {
    let year = year.trim();
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::NotNumeric("year"));
    }

    Ok(year.to_owned())
}

/// Validates a borrower name. On top of [`valid_text`], rejects the
/// literal the book file uses for "no borrower".
pub fn valid_borrower(student: &str) -> Result<String, FieldError> {
    let student = valid_text("student", student)?;
    if student == ABSENT {
        return Err(FieldError::Reserved("student"));
    }
    Ok(student)
}
