/// Lowercases the domain part of an address and strips surrounding
/// whitespace. The local part is left alone: mailbox names may be case
/// sensitive.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}
