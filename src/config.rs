//! Where the library keeps its files and which lending rules it applies.
//!
//! Values are layered: built-in defaults, then an optional `biblio.toml` in
//! the data directory, then `BIBLIO_*` environment variables.

use crate::library::{LoanPolicy, MAX_LOAN_PERIOD_DAYS};
use crate::store::FlatFileStore;
use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional settings file inside the data directory.
pub const CONFIG_FILE: &str = "biblio.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryConfig {
    pub data_dir: PathBuf,
    pub books_file: String,
    pub admins_file: String,
    pub loan_period_days: i64,
    pub fine_per_day: u64,
    pub max_loans: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        let policy = LoanPolicy::default();
        LibraryConfig {
            data_dir: Self::default_data_dir(),
            books_file: "books.txt".to_string(),
            admins_file: "admins.txt".to_string(),
            loan_period_days: policy.loan_period_days,
            fine_per_day: policy.fine_per_day,
            max_loans: policy.max_loans,
        }
    }
}

impl LibraryConfig {
    /// Loads configuration for `data_dir`, or the platform default when `None`.
    ///
    /// An explicit `data_dir` wins over the file and the environment.
    ///
    /// # Errors
    /// - [`ConfigError`] if the settings file cannot be parsed, a value has the
    ///   wrong type, or the loan policy is not positive or the loan period is
    ///   longer than [`MAX_LOAN_PERIOD_DAYS`].
    pub fn load(data_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = LibraryConfig::default();
        let dir = data_dir
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("BIBLIO_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| defaults.data_dir.clone());

        let mut builder = Config::builder()
            .set_default("data_dir", dir.to_string_lossy().into_owned())?
            .set_default("books_file", defaults.books_file)?
            .set_default("admins_file", defaults.admins_file)?
            .set_default("loan_period_days", defaults.loan_period_days)?
            .set_default("fine_per_day", defaults.fine_per_day as i64)?
            .set_default("max_loans", defaults.max_loans as i64)?
            .add_source(File::from(dir.join(CONFIG_FILE)).required(false))
            .add_source(Environment::with_prefix("BIBLIO").try_parsing(true));

        if let Some(dir) = data_dir {
            builder = builder.set_override("data_dir", dir.to_string_lossy().into_owned())?;
        }

        let config: LibraryConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
        Ok(config)
    }

    pub fn policy(&self) -> LoanPolicy {
        LoanPolicy {
            loan_period_days: self.loan_period_days,
            fine_per_day: self.fine_per_day,
            max_loans: self.max_loans,
        }
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    pub fn admins_path(&self) -> PathBuf {
        self.data_dir.join(&self.admins_file)
    }

    /// The flat-file store these settings point at.
    pub fn store(&self) -> FlatFileStore {
        FlatFileStore::new(self.books_path(), self.admins_path())
    }

    /// `<data dir>/biblio`, or the current directory if the platform has none.
    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("biblio"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LOAN_PERIOD_DAYS).contains(&self.loan_period_days) {
            return Err(ConfigError::Message(format!(
                "loan_period_days must be between 1 and {MAX_LOAN_PERIOD_DAYS}"
            )));
        }

        if self.max_loans < 1 {
            return Err(ConfigError::Message(
                "max_loans must be at least 1".to_string(),
            ));
        }

        if self.books_file.is_empty() || self.admins_file.is_empty() {
            return Err(ConfigError::Message(
                "file names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
