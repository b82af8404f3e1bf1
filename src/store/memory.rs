use crate::domain::{Admin, Book};
use crate::store::{BookStore, StoreError};

/// Keeps both collections in process memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    books: Vec<Book>,
    admins: Vec<Admin>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with admins, as if they had been saved earlier.
    pub fn with_admins(admins: Vec<Admin>) -> Self {
        MemoryStore {
            admins,
            ..Self::default()
        }
    }

    /// Books as last saved.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Admins as last saved.
    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    /// Number of save calls received, for either collection.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl BookStore for MemoryStore {
    fn load_books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.clone())
    }

    fn save_books(&mut self, books: &[Book]) -> Result<(), StoreError> {
        self.books = books.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_admins(&self) -> Result<Vec<Admin>, StoreError> {
        Ok(self.admins.clone())
    }

    fn save_admins(&mut self, admins: &[Admin]) -> Result<(), StoreError> {
        self.admins = admins.to_vec();
        self.saves += 1;
        Ok(())
    }
}
