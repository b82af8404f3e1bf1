use biblio_core::domain::{Admin, Book, BookStatus, FieldError, valid_borrower};

#[test]
fn new_book_is_available_without_loan() -> Result<(), FieldError> {
    let book = Book::new("Dune", "Frank Herbert", "1965")?;

    assert_eq!(book.status(), BookStatus::Available);
    assert!(book.is_available());
    assert!(book.borrower().is_none());
    assert!(book.borrow_date().is_none());

    Ok(())
}

#[test]
fn empty_title_or_author_is_rejected() {
    assert_eq!(
        Book::new("", "Herbert", "1965"),
        Err(FieldError::Empty("title"))
    );
    assert_eq!(
        Book::new("Dune", "", "1965"),
        Err(FieldError::Empty("author"))
    );
}

#[test]
fn non_digit_year_is_rejected() {
    for year in ["abc", "", "19 65", "-1965", "1965a"] {
        assert_eq!(
            Book::new("Dune", "Herbert", year),
            Err(FieldError::NotNumeric("year")),
            "year {year:?} should be rejected"
        );
    }
}

#[test]
fn separator_in_field_is_rejected() {
    assert_eq!(
        Book::new("Dune, Messiah", "Herbert", "1969"),
        Err(FieldError::Separator("title"))
    );
    assert_eq!(
        Book::new("Dune", "Frank\nHerbert", "1965"),
        Err(FieldError::Separator("author"))
    );
}

#[test]
fn title_match_ignores_case() -> Result<(), FieldError> {
    let book = Book::new("Dune", "Herbert", "1965")?;

    assert!(book.title_matches("dune"));
    assert!(book.title_matches("DUNE"));
    assert!(!book.title_matches("Dune Messiah"));

    Ok(())
}

#[test]
fn status_parses_and_displays() {
    assert_eq!("Issued".parse::<BookStatus>(), Ok(BookStatus::Issued));
    assert_eq!("Available".parse::<BookStatus>(), Ok(BookStatus::Available));
    assert!("issued".parse::<BookStatus>().is_err());
    assert_eq!(BookStatus::Issued.to_string(), "Issued");
}

#[test]
fn from_parts_enforces_loan_invariant() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let issued = Book::from_parts(
        "Dune".into(),
        "Herbert".into(),
        "1965".into(),
        BookStatus::Issued,
        Some(("alice".into(), date)),
    );
    assert_eq!(issued.unwrap().borrower(), Some("alice"));

    assert!(
        Book::from_parts(
            "Dune".into(),
            "Herbert".into(),
            "1965".into(),
            BookStatus::Issued,
            None
        )
        .is_none()
    );
    assert!(
        Book::from_parts(
            "Dune".into(),
            "Herbert".into(),
            "1965".into(),
            BookStatus::Available,
            Some(("alice".into(), date))
        )
        .is_none()
    );
}

#[test]
fn borrower_cannot_be_reserved_literal() {
    assert_eq!(valid_borrower("None"), Err(FieldError::Reserved("student")));
    assert_eq!(valid_borrower(""), Err(FieldError::Empty("student")));
    assert_eq!(valid_borrower("alice"), Ok("alice".to_string()));
}

#[test]
fn admin_requires_both_parts() {
    assert!(Admin::new("root", "secret").is_ok());
    assert_eq!(Admin::new("", "secret"), Err(FieldError::Empty("username")));
    assert_eq!(
        Admin::new("root", "a,b"),
        Err(FieldError::Separator("password"))
    );
}

#[test]
fn book_display_lists_fields() -> Result<(), FieldError> {
    let book = Book::new("Dune", "Herbert", "1965")?;
    assert_eq!(
        book.to_string(),
        "Title: Dune, Author: Herbert, Year: 1965, Status: Available"
    );
    Ok(())
}

#[test]
fn surrounding_whitespace_is_trimmed() -> Result<(), FieldError> {
    let book = Book::new("  Dune ", "\tHerbert", " 1965\n")?;
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");
    assert_eq!(book.year, "1965");

    let admin = Admin::new(" root ", " secret ")?;
    assert_eq!(admin.username, "root");
    assert_eq!(admin.password, "secret");

    assert_eq!(valid_borrower("  None "), Err(FieldError::Reserved("student")));
    assert_eq!(Book::new(" ", "Herbert", "1965"), Err(FieldError::Empty("title")));

    Ok(())
}
