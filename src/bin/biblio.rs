use biblio_core::config::LibraryConfig;
use biblio_core::library::{Library, LibraryError};
use biblio_core::store::FlatFileStore;
use biblio_core::{BiblioError, BiblioResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "biblio")]
#[command(about = "Library book tracking for administrators", long_about = None)]
struct Cli {
    /// Directory holding books.txt, admins.txt and an optional biblio.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Admin username
    #[arg(short, long, env = "BIBLIO_USER", global = true)]
    user: Option<String>,

    /// Admin password
    #[arg(short, long, env = "BIBLIO_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new book
    Add {
        title: String,
        author: String,
        year: String,
    },
    /// Issue a book to a student
    Issue { title: String, student: String },
    /// Change the author or year of a book
    Edit {
        title: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },
    /// Return an issued book and report any fine
    Return { title: String },
    /// Delete a book
    Delete { title: String },
    /// Look up a book by title
    Search { title: String },
    /// List every book
    List,
    /// Change the password of the logged-in admin
    Passwd {
        #[arg(value_name = "NEW_PASSWORD")]
        new_password: String,
    },
    /// Register another admin (allowed without login while no admin exists)
    AddAdmin {
        username: String,
        #[arg(value_name = "PASSWORD")]
        secret: String,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "biblio=warn,biblio_core=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(error: &BiblioError) -> u8 {
    match error {
        BiblioError::Library(LibraryError::Validation(_)) => 2,
        BiblioError::Library(LibraryError::NotFound(_)) => 3,
        BiblioError::Library(LibraryError::BusinessRule(_)) => 4,
        BiblioError::Other(_) => 5,
        _ => 1,
    }
}

fn run(cli: Cli) -> BiblioResult<String> {
    let config = LibraryConfig::load(cli.data_dir.as_deref())?;
    let mut library = Library::open(config.store(), config.policy())?;

    let bootstrapping = matches!(cli.command, Commands::AddAdmin { .. }) && library.admins().is_empty();
    let username = if bootstrapping {
        String::new()
    } else {
        authenticate(&library, cli.user.as_deref(), cli.password.as_deref())?
    };

    let message = match cli.command {
        Commands::Add { title, author, year } => {
            library.add_book(title.trim(), author.trim(), year.trim())?;
            "Book added successfully!".to_string()
        }
        Commands::Issue { title, student } => library
            .issue_book(title.trim(), student.trim())?
            .to_string(),
        Commands::Edit {
            title,
            author,
            year,
        } => library
            .edit_book(
                title.trim(),
                author.as_deref().map(str::trim),
                year.as_deref().map(str::trim),
            )?
            .to_string(),
        Commands::Return { title } => library.return_book(title.trim())?.to_string(),
        Commands::Delete { title } => library.delete_book(title.trim())?.to_string(),
        Commands::Search { title } => match library.search_book(title.trim()) {
            Some(book) => {
                let issued_to = book.borrower().unwrap_or("None");
                let issue_date = book
                    .borrow_date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "None".to_string());
                format!("{book}\nIssued to: {issued_to}, Issue Date: {issue_date}")
            }
            None => return Err(LibraryError::NotFound("Book not found.".to_string()).into()),
        },
        Commands::List => list_books(&library),
        Commands::Passwd { new_password } => {
            let old_password = cli.password.as_deref().map(str::trim).unwrap_or_default();
            library.change_password(&username, old_password, new_password.trim())?;
            "Password changed.".to_string()
        }
        Commands::AddAdmin { username, secret } => {
            library.add_admin(username.trim(), secret.trim())?;
            format!("Admin '{}' added.", username.trim())
        }
    };

    Ok(message)
}

/// Checks the supplied credentials and returns the username on success.
fn authenticate(
    library: &Library<FlatFileStore>,
    user: Option<&str>,
    password: Option<&str>,
) -> BiblioResult<String> {
    let (Some(user), Some(password)) = (user, password) else {
        return Err(BiblioError::Other(
            "Login required: pass --user and --password.".to_string(),
        ));
    };

    let user = user.trim();
    if !library.login(user, password.trim()) {
        return Err(BiblioError::Other(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(user.to_string())
}

fn list_books(library: &Library<FlatFileStore>) -> String {
    let books = library.show_books();
    if books.is_empty() {
        return "No books available in the library.".to_string();
    }

    books
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
