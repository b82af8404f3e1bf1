use crate::domain::{ABSENT, Admin, Book, BookStatus};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Date format of the borrow date column. Time of day is not stored.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const BOOK_FIELDS: usize = 6;
const ADMIN_FIELDS: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("unknown status `{0}`")]
    Status(String),

    #[error("invalid borrow date `{0}`")]
    Date(String),

    #[error("status `{0}` does not agree with borrower and borrow date")]
    Inconsistent(String),
}

/// Renders a book as `title,author,year,status,borrower,borrow_date`.
pub fn encode_book(book: &Book) -> String {
    let borrower = book.borrower().unwrap_or(ABSENT);
    let date = book
        .borrow_date()
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| ABSENT.to_string());

    format!(
        "{},{},{},{},{},{}",
        book.title,
        book.author,
        book.year,
        book.status(),
        borrower,
        date
    )
}

/// Parses one line of the book file. The line is trimmed first; fields are not.
pub fn decode_book(line: &str) -> Result<Book, LineError> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let &[title, author, year, status, borrower, date] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            expected: BOOK_FIELDS,
            found: fields.len(),
        });
    };

    let parsed_status: BookStatus = status
        .parse()
        .map_err(|_| LineError::Status(status.to_string()))?;

    let borrower = (borrower != ABSENT).then(|| borrower.to_string());
    let borrow_date = if date == ABSENT {
        None
    } else {
        let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| LineError::Date(date.to_string()))?;
        Some(day.and_time(NaiveTime::default()))
    };

    let loan = match (borrower, borrow_date) {
        (Some(who), Some(when)) => Some((who, when)),
        (None, None) => None,
        _ => return Err(LineError::Inconsistent(status.to_string())),
    };

    Book::from_parts(
        title.to_string(),
        author.to_string(),
        year.to_string(),
        parsed_status,
        loan,
    )
    .ok_or_else(|| LineError::Inconsistent(status.to_string()))
}

pub fn encode_admin(admin: &Admin) -> String {
    format!("{},{}", admin.username, admin.password)
}

/// Parses one `username,password` line.
pub fn decode_admin(line: &str) -> Result<Admin, LineError> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let &[username, password] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            expected: ADMIN_FIELDS,
            found: fields.len(),
        });
    };

    Ok(Admin {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_available_book() {
        let book = decode_book("Dune,Herbert,1965,Available,None,None\n").unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.status(), BookStatus::Available);
        assert!(book.borrower().is_none());
        assert!(book.borrow_date().is_none());
    }

    #[test]
    fn decodes_issued_book_at_midnight() {
        let book = decode_book("Dune,Herbert,1965,Issued,alice,2024-03-01").unwrap();
        assert_eq!(book.borrower(), Some("alice"));
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(book.borrow_date(), Some(expected));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            decode_book("Dune,Herbert,1965").unwrap_err(),
            LineError::FieldCount {
                expected: 6,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_bad_date_and_status() {
        assert!(matches!(
            decode_book("Dune,Herbert,1965,Issued,alice,03/01/2024"),
            Err(LineError::Date(_))
        ));
        assert!(matches!(
            decode_book("Dune,Herbert,1965,Lost,None,None"),
            Err(LineError::Status(_))
        ));
    }

    #[test]
    fn rejects_half_present_loan() {
        assert!(matches!(
            decode_book("Dune,Herbert,1965,Issued,alice,None"),
            Err(LineError::Inconsistent(_))
        ));
        assert!(matches!(
            decode_book("Dune,Herbert,1965,Available,alice,2024-03-01"),
            Err(LineError::Inconsistent(_))
        ));
    }

    #[test]
    fn encodes_absent_fields_as_none() {
        let book = Book::new("Dune", "Herbert", "1965").unwrap();
        assert_eq!(encode_book(&book), "Dune,Herbert,1965,Available,None,None");
    }

    #[test]
    fn admin_line_needs_two_fields() {
        let admin = decode_admin("root,secret\n").unwrap();
        assert_eq!(admin.username, "root");
        assert_eq!(admin.password, "secret");
        assert!(decode_admin("root").is_err());
        assert!(decode_admin("root,secret,extra").is_err());
    }
}
