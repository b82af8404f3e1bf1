pub mod fine;
pub mod outcome;

use crate::auth;
use crate::domain::{self, Admin, Book, FieldError};
use crate::store::{BookStore, StoreError};
use chrono::{Local, NaiveDateTime};
use thiserror::Error;

pub use fine::{LoanPolicy, MAX_LOAN_PERIOD_DAYS};
pub use outcome::{Deleted, Edited, Issued, ReturnReceipt};

/// Why a library operation did not go through.
///
/// Front ends branch on the variant; `Display` gives the message to show.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Invalid input: {0}")]
    Validation(#[from] FieldError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("loan period of {0} days cannot be applied to this date")]
    LoanPeriod(i64),
}

/// The in-memory book collection and admin list, backed by a [`BookStore`].
///
/// Both collections are loaded once by [`Library::open`]. Every successful
/// mutation writes the full collection back through the store before the
/// in-memory copy is replaced, so a failed save leaves the library unchanged.
///
/// Lookups by title are case-insensitive and resolve to the earliest
/// matching book in insertion order.
#[derive(Debug)]
pub struct Library<S: BookStore> {
    store: S,
    books: Vec<Book>,
    admins: Vec<Admin>,
    policy: LoanPolicy,
}

impl<S: BookStore> Library<S> {
    /// Loads books and admins from `store`.
    ///
    /// # Errors
    /// Returns [`LibraryError::Store`] if either collection cannot be read.
    pub fn open(store: S, policy: LoanPolicy) -> Result<Self, LibraryError> {
        let books = store.load_books()?;
        let admins = store.load_admins()?;
        tracing::debug!(
            books = books.len(),
            admins = admins.len(),
            "library opened"
        );

        Ok(Library {
            store,
            books,
            admins,
            policy,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Adds a new available book at the end of the collection.
    ///
    /// Titles are not required to be unique.
    ///
    /// # Errors
    /// - [`LibraryError::Validation`] if the title or author is empty, the year
    ///   is not all digits, or a field contains a comma or line break.
    /// - [`LibraryError::Store`] if saving fails.
    pub fn add_book(&mut self, title: &str, author: &str, year: &str) -> Result<Book, LibraryError> {
        let book = Book::new(title, author, year)?;

        let mut books = self.books.clone();
        books.push(book.clone());
        self.commit_books(books)?;

        tracing::info!(title = %book.title, "book added");
        Ok(book)
    }

    /// Issues the first available book titled `title` to `student`, now.
    pub fn issue_book(&mut self, title: &str, student: &str) -> Result<Issued, LibraryError> {
        self.issue_book_at(title, student, Local::now().naive_local())
    }

    /// Issues the first available book titled `title` to `student` at `now`.
    ///
    /// # Errors
    /// - [`LibraryError::Validation`] if the student name is empty, contains a
    ///   separator, or is the literal `None`.
    /// - [`LibraryError::BusinessRule`] if the student already holds the
    ///   maximum number of books.
    /// - [`LibraryError::NotFound`] if no matching book is available, whether
    ///   the title is unknown or every copy is out.
    /// - [`LibraryError::LoanPeriod`] if the due date falls outside the calendar.
    pub fn issue_book_at(
        &mut self,
        title: &str,
        student: &str,
        now: NaiveDateTime,
    ) -> Result<Issued, LibraryError> {
        let student = domain::valid_borrower(student)?;

        let held = self.books.iter().filter(|b| b.is_held_by(&student)).count();
        if held >= self.policy.max_loans {
            return Err(LibraryError::BusinessRule(format!(
                "Student {student} has reached the maximum limit of {} books.",
                self.policy.max_loans
            )));
        }

        let due = self.policy.due_date(now)?;

        let mut books = self.books.clone();
        let Some(book) = books
            .iter_mut()
            .find(|b| b.title_matches(title) && b.is_available())
        else {
            return Err(LibraryError::NotFound(format!(
                "Book '{title}' is not available or does not exist."
            )));
        };
        book.issue_to(&student, now);
        let title = book.title.clone();
        self.commit_books(books)?;

        tracing::info!(title = %title, student = %student, "book issued");
        Ok(Issued {
            title,
            student,
            borrowed_at: now,
            due,
        })
    }

    /// Updates the author and/or year of the first book titled `title`.
    ///
    /// Empty or invalid replacement values are ignored rather than reported;
    /// [`Edited`] records which fields actually changed. Nothing is saved if
    /// neither field changed.
    ///
    /// # Errors
    /// - [`LibraryError::NotFound`] if no book has that title.
    /// - [`LibraryError::Store`] if saving fails.
    pub fn edit_book(
        &mut self,
        title: &str,
        author: Option<&str>,
        year: Option<&str>,
    ) -> Result<Edited, LibraryError> {
        let mut books = self.books.clone();
        let Some(book) = books.iter_mut().find(|b| b.title_matches(title)) else {
            return Err(not_found(title));
        };

        let new_author = author.and_then(|a| domain::valid_text("author", a).ok());
        let new_year = year.and_then(|y| domain::valid_year(y).ok());
        let author_changed = new_author.is_some();
        let year_changed = new_year.is_some();

        if let Some(author) = new_author {
            book.author = author;
        }
        if let Some(year) = new_year {
            book.year = year;
        }
        let edited = book.clone();

        if author_changed || year_changed {
            self.commit_books(books)?;
            tracing::info!(title = %edited.title, author_changed, year_changed, "book edited");
        }

        Ok(Edited {
            book: edited,
            author_changed,
            year_changed,
        })
    }

    /// Returns the first issued book titled `title`, now.
    pub fn return_book(&mut self, title: &str) -> Result<ReturnReceipt, LibraryError> {
        self.return_book_at(title, Local::now().naive_local())
    }

    /// Returns the first issued book titled `title` at `now` and works out
    /// the fine.
    ///
    /// # Errors
    /// - [`LibraryError::NotFound`] if no book with that title is issued.
    /// - [`LibraryError::LoanPeriod`] if the due date falls outside the calendar.
    /// - [`LibraryError::Store`] if saving fails.
    pub fn return_book_at(
        &mut self,
        title: &str,
        now: NaiveDateTime,
    ) -> Result<ReturnReceipt, LibraryError> {
        let mut books = self.books.clone();
        let loan = books
            .iter_mut()
            .find(|b| b.title_matches(title) && !b.is_available());
        let Some((book, student, borrowed_at)) = loan.and_then(|b| {
            let student = b.borrower()?.to_string();
            let borrowed_at = b.borrow_date()?;
            Some((b, student, borrowed_at))
        }) else {
            return Err(LibraryError::NotFound(format!(
                "Book '{title}' is not issued."
            )));
        };

        let due = self.policy.due_date(borrowed_at)?;
        let overdue_days = self.policy.overdue_days(due, now);
        let receipt = ReturnReceipt {
            title: book.title.clone(),
            student,
            due,
            returned_at: now,
            late: now > due,
            overdue_days,
            fine: self.policy.fine_for(overdue_days),
        };

        book.mark_returned();
        self.commit_books(books)?;

        tracing::info!(
            title = %receipt.title,
            fine = receipt.fine,
            late = receipt.late,
            "book returned"
        );
        Ok(receipt)
    }

    /// Removes the first book titled `title`, issued or not.
    ///
    /// # Errors
    /// - [`LibraryError::NotFound`] if no book has that title.
    /// - [`LibraryError::Store`] if saving fails.
    pub fn delete_book(&mut self, title: &str) -> Result<Deleted, LibraryError> {
        let pos = self.position_of(title)?;

        let mut books = self.books.clone();
        let book = books.remove(pos);
        self.commit_books(books)?;

        tracing::info!(title = %book.title, "book deleted");
        Ok(Deleted { book })
    }

    /// The first book titled `title`, if any.
    pub fn search_book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title_matches(title))
    }

    /// Every book, in insertion order.
    pub fn show_books(&self) -> &[Book] {
        &self.books
    }

    /// Books currently issued to `student`.
    pub fn loans_of(&self, student: &str) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_held_by(student)).collect()
    }

    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    /// Checks an exact username/password pair against the admin list.
    pub fn login(&self, username: &str, password: &str) -> bool {
        auth::login(&self.admins, username, password)
    }

    /// Replaces the password of the first admin matching
    /// `(username, old_password)` and saves the admin list.
    ///
    /// # Errors
    /// - [`LibraryError::Validation`] if the new password is empty or
    ///   contains a separator.
    /// - [`LibraryError::NotFound`] if no admin matches.
    /// - [`LibraryError::Store`] if saving fails.
    pub fn change_password(
        &mut self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), LibraryError> {
        let new_password = domain::valid_text("password", new_password)?;

        let mut admins = self.admins.clone();
        if !auth::change_password(&mut admins, username, old_password, &new_password) {
            return Err(LibraryError::NotFound(
                "No admin matches that username and password.".to_string(),
            ));
        }

        self.store.save_admins(&admins)?;
        self.admins = admins;
        tracing::info!(username, "admin password changed");
        Ok(())
    }

    /// Appends an admin pair and saves the admin list.
    ///
    /// Usernames are not required to be unique.
    pub fn add_admin(&mut self, username: &str, password: &str) -> Result<(), LibraryError> {
        let admin = Admin::new(username, password)?;

        let mut admins = self.admins.clone();
        admins.push(admin);
        self.store.save_admins(&admins)?;
        self.admins = admins;
        tracing::info!(username, "admin added");
        Ok(())
    }

    fn position_of(&self, title: &str) -> Result<usize, LibraryError> {
        self.books
            .iter()
            .position(|b| b.title_matches(title))
            .ok_or_else(|| not_found(title))
    }

    /// Saves `books` and, only if that worked, makes them current.
    fn commit_books(&mut self, books: Vec<Book>) -> Result<(), LibraryError> {
        self.store.save_books(&books)?;
        self.books = books;
        Ok(())
    }
}

fn not_found(title: &str) -> LibraryError {
    LibraryError::NotFound(format!("Book '{title}' not found."))
}
