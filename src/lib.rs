//! # biblio_core
//!
//! Record keeping for a small lending library: books, loans, late fines and
//! the administrators allowed to manage them, persisted to two plain text files.
//!
//! ## Features
//!
//! - **Book Management**: Add, edit, delete, search and list books
//! - **Loans**: Issue books to students with a per-student limit, return them with fine calculation
//! - **Flat-file Storage**: Comma-delimited `books.txt` and `admins.txt`, rewritten atomically on every change
//! - **Admin Credentials**: Login checks and password changes
//! - **Layered Configuration**: Defaults, an optional `biblio.toml`, and `BIBLIO_*` environment variables
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use biblio_core::config::LibraryConfig;
//! use biblio_core::library::Library;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LibraryConfig::load(None)?;
//! let mut library = Library::open(config.store(), config.policy())?;
//!
//! library.add_book("Dune", "Frank Herbert", "1965")?;
//! let issued = library.issue_book("dune", "alice")?;
//! println!("{issued}");
//!
//! let receipt = library.return_book("Dune")?;
//! println!("{receipt}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`domain`]**: `Book`, `BookStatus`, `Admin` and field validation
//! - **[`store`]**: The `BookStore` repository trait with flat-file and in-memory implementations
//! - **[`library`]**: The `Library` service, loan policy and operation outcomes
//! - **[`auth`]**: Credential checks over the admin list
//! - **[`config`]**: File locations and lending rules
//! - **[`error`]**: Unified error handling
//!
//! ## Error Handling
//!
//! Library operations return [`LibraryError`](library::LibraryError), whose
//! variants separate invalid input, missing books, broken lending rules and
//! storage failures. Application code can collect everything into
//! [`BiblioResult<T>`] and use `?` throughout.
//!
//! ```rust,no_run
//! use biblio_core::{BiblioResult, config::LibraryConfig, library::Library};
//!
//! fn lend(title: &str, student: &str) -> BiblioResult<()> {
//!     let config = LibraryConfig::load(None)?;
//!     let mut library = Library::open(config.store(), config.policy())?;
//!     library.issue_book(title, student)?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod library;
pub mod store;

/// Re-exports the most commonly used types for convenience.
pub use error::{BiblioError, BiblioResult};
