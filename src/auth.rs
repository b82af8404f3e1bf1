//! Plaintext admin credential checks.
//!
//! Credentials are compared verbatim with a linear scan; duplicate usernames
//! are allowed and the first matching pair wins.

use crate::domain::Admin;

/// Returns true if some admin has exactly this username and password.
pub fn login(admins: &[Admin], username: &str, password: &str) -> bool {
    admins
        .iter()
        .any(|a| a.username == username && a.password == password)
}

/// Replaces the password of the first admin matching `(username, old_password)`.
///
/// Returns false and leaves `admins` untouched when nothing matches.
pub fn change_password(
    admins: &mut [Admin],
    username: &str,
    old_password: &str,
    new_password: &str,
) -> bool {
    match admins
        .iter_mut()
        .find(|a| a.username == username && a.password == old_password)
    {
        Some(admin) => {
            admin.password = new_password.to_owned();
            true
        }
        None => false,
    }
}
