use biblio_core::config::{CONFIG_FILE, LibraryConfig};
use biblio_core::error::BiblioError;
use biblio_core::library::{Library, LoanPolicy, MAX_LOAN_PERIOD_DAYS};
use std::fs;
use tempfile::TempDir;
use uuid::Uuid;

#[test]
fn defaults_apply_without_settings_file() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;

    let config = LibraryConfig::load(Some(tmpdir.path()))?;

    assert_eq!(config.data_dir, tmpdir.path());
    assert_eq!(config.books_path(), tmpdir.path().join("books.txt"));
    assert_eq!(config.admins_path(), tmpdir.path().join("admins.txt"));
    assert_eq!(config.policy(), LoanPolicy::default());

    Ok(())
}

#[test]
fn settings_file_overrides_defaults() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;
    fs::write(
        tmpdir.path().join(CONFIG_FILE),
        "books_file = \"catalog.txt\"\nloan_period_days = 21\nfine_per_day = 2\nmax_loans = 5\n",
    )?;

    let config = LibraryConfig::load(Some(tmpdir.path()))?;

    assert_eq!(config.books_path(), tmpdir.path().join("catalog.txt"));
    assert_eq!(config.admins_path(), tmpdir.path().join("admins.txt"));
    assert_eq!(
        config.policy(),
        LoanPolicy {
            loan_period_days: 21,
            fine_per_day: 2,
            max_loans: 5,
        }
    );

    Ok(())
}

#[test]
fn explicit_data_dir_wins_over_file() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;
    let elsewhere = format!("/nonexistent/{}", Uuid::new_v4());
    fs::write(
        tmpdir.path().join(CONFIG_FILE),
        format!("data_dir = \"{elsewhere}\"\n"),
    )?;

    let config = LibraryConfig::load(Some(tmpdir.path()))?;
    assert_eq!(config.data_dir, tmpdir.path());

    Ok(())
}

#[test]
fn non_positive_policy_is_rejected() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;
    fs::write(tmpdir.path().join(CONFIG_FILE), "max_loans = 0\n")?;

    assert!(LibraryConfig::load(Some(tmpdir.path())).is_err());

    fs::write(tmpdir.path().join(CONFIG_FILE), "loan_period_days = 0\n")?;
    assert!(LibraryConfig::load(Some(tmpdir.path())).is_err());

    Ok(())
}

#[test]
fn configured_store_backs_a_library() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;
    let config = LibraryConfig::load(Some(tmpdir.path()))?;

    let mut library = Library::open(config.store(), config.policy())?;
    library.add_book("Dune", "Herbert", "1965")?;

    let contents = fs::read_to_string(config.books_path())?;
    assert_eq!(contents, "Dune,Herbert,1965,Available,None,None\n");

    Ok(())
}

#[test]
fn oversized_loan_period_is_rejected() -> Result<(), BiblioError> {
    let tmpdir = TempDir::new()?;
    fs::write(
        tmpdir.path().join(CONFIG_FILE),
        "loan_period_days = 100000000\n",
    )?;

    assert!(LibraryConfig::load(Some(tmpdir.path())).is_err());

    fs::write(
        tmpdir.path().join(CONFIG_FILE),
        format!("loan_period_days = {MAX_LOAN_PERIOD_DAYS}\n"),
    )?;
    let config = LibraryConfig::load(Some(tmpdir.path()))?;
    assert_eq!(config.loan_period_days, MAX_LOAN_PERIOD_DAYS);

    Ok(())
}
