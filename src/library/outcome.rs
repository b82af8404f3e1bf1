//! Results of successful library operations.
//!
//! Each outcome carries the data a front end may want to show and renders
//! the message for the user through `Display`.

use crate::domain::Book;
use chrono::NaiveDateTime;
use std::fmt;

/// A book was handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued {
    pub title: String,
    pub student: String,
    pub borrowed_at: NaiveDateTime,
    pub due: NaiveDateTime,
}

impl fmt::Display for Issued {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book '{}' issued to {}.", self.title, self.student)
    }
}

/// A book came back, possibly late.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub title: String,
    pub student: String,
    pub due: NaiveDateTime,
    pub returned_at: NaiveDateTime,
    /// True whenever the return happened after the due instant.
    pub late: bool,
    pub overdue_days: i64,
    pub fine: u64,
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.late {
            write!(f, "Book returned late. Fine amount: ${}", self.fine)
        } else {
            f.write_str("Book returned on time. No fine.")
        }
    }
}

/// A book's details were updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edited {
    pub book: Book,
    pub author_changed: bool,
    pub year_changed: bool,
}

impl fmt::Display for Edited {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book '{}' updated successfully.", self.book.title)
    }
}

/// A book was removed from the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub book: Book,
}

impl fmt::Display for Deleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Book '{}' deleted successfully.", self.book.title)
    }
}
