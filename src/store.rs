//! Persistence for books and admin credentials.
//!
//! The [`BookStore`] trait is the seam between the [`Library`](crate::library::Library)
//! service and wherever records actually live. Every call loads or replaces the
//! whole collection; there is no per-record update.

pub mod codec;
pub mod flat_file;
pub mod memory;

use crate::domain::{Admin, Book};
use thiserror::Error;

pub use flat_file::FlatFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load-all / save-all repository for the library's two collections.
///
/// A missing backing store loads as an empty collection. Saving replaces
/// the previous contents entirely, keeping the order of the slice.
pub trait BookStore {
    fn load_books(&self) -> Result<Vec<Book>, StoreError>;

    fn save_books(&mut self, books: &[Book]) -> Result<(), StoreError>;

    fn load_admins(&self) -> Result<Vec<Admin>, StoreError>;

    fn save_admins(&mut self, admins: &[Admin]) -> Result<(), StoreError>;
}
