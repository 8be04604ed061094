use serde_json::{Map, Value};
use tracing::debug;
use validator::ValidateEmail;

use crate::db::db_service::DbService;
use crate::types::{error::AppError, user::NewUser};
use crate::utils::email::normalize_email;
use crate::validation::{password::PasswordPolicy, Field, FieldErrors};

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const EMAIL_MAX_LENGTH: usize = 254;

const TAKEN: &str = "has already been taken";

/// Values that passed every format rule, before the store is consulted.
#[derive(Debug, Default, PartialEq, Eq)]
struct Checked<'a> {
    username: Option<&'a str>,
    email: Option<String>,
    password: Option<&'a str>,
}

/// Validates a registration payload and returns the sanitized user.
///
/// Format and strength rules run first; usernames and emails that pass them
/// are then checked for uniqueness against the store. Nothing is written.
pub async fn validate(
    db: &DbService,
    payload: &Map<String, Value>,
    policy: &PasswordPolicy,
) -> Result<NewUser, AppError> {
    let (checked, mut errors) = check_format(payload, policy);

    if let Some(username) = checked.username {
        if db.username_exists(username).await? {
            errors.add(Field::Username, TAKEN);
        }
    }
    if let Some(email) = checked.email.as_deref() {
        if db.email_exists(email).await? {
            errors.add(Field::Email, TAKEN);
        }
    }

    match checked {
        Checked {
            username: Some(username),
            email: Some(email),
            password: Some(password),
        } if errors.is_empty() => Ok(NewUser {
            username: username.to_string(),
            email,
            password: password.to_string(),
        }),
        _ => {
            debug!(rejected = %errors, "registration payload rejected");
            Err(AppError::Validation(errors))
        }
    }
}

fn check_format<'a>(
    payload: &'a Map<String, Value>,
    policy: &PasswordPolicy,
) -> (Checked<'a>, FieldErrors) {
    let mut errors = FieldErrors::new();

    let raw_username = read_string(payload, Field::Username, &mut errors).map(str::trim);
    let raw_email = read_string(payload, Field::Email, &mut errors).map(str::trim);
    let raw_password = read_string(payload, Field::Password, &mut errors);

    let username = raw_username.filter(|username| check_username(username, &mut errors));
    let email = raw_email
        .filter(|email| check_email(email, &mut errors))
        .map(normalize_email);

    let password = raw_password.filter(|password| {
        if password.is_empty() {
            errors.add(Field::Password, "can't be blank");
            return false;
        }

        let attributes: Vec<(Field, &str)> = [
            raw_username.map(|u| (Field::Username, u)),
            raw_email.map(|e| (Field::Email, e)),
        ]
        .into_iter()
        .flatten()
        .filter(|(_, value)| !value.is_empty())
        .collect();

        let failures = policy.check(password, &attributes);
        let passed = failures.is_empty();
        for message in failures {
            errors.add(Field::Password, message);
        }
        passed
    });

    (
        Checked {
            username,
            email,
            password,
        },
        errors,
    )
}

fn read_string<'a>(
    payload: &'a Map<String, Value>,
    field: Field,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match payload.get(field.as_str()) {
        Some(Value::String(value)) => Some(value.as_str()),
        Some(Value::Null) => {
            errors.add(field, "may not be null");
            None
        }
        Some(_) => {
            errors.add(field, "must be a string");
            None
        }
        None => {
            errors.add(field, "is required");
            None
        }
    }
}

fn check_username(username: &str, errors: &mut FieldErrors) -> bool {
    if username.is_empty() {
        errors.add(Field::Username, "can't be blank");
        return false;
    }

    let mut ok = true;
    if username.chars().count() > USERNAME_MAX_LENGTH {
        errors.add(
            Field::Username,
            format!("is too long (maximum is {USERNAME_MAX_LENGTH} characters)"),
        );
        ok = false;
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add(
            Field::Username,
            "may contain only letters, numbers, and @/./+/-/_ characters",
        );
        ok = false;
    }
    ok
}

fn check_email(email: &str, errors: &mut FieldErrors) -> bool {
    if email.is_empty() {
        errors.add(Field::Email, "can't be blank");
        return false;
    }
    if email.chars().count() > EMAIL_MAX_LENGTH {
        errors.add(
            Field::Email,
            format!("is too long (maximum is {EMAIL_MAX_LENGTH} characters)"),
        );
        return false;
    }
    if !email.validate_email() {
        errors.add(Field::Email, "is invalid");
        return false;
    }
    true
}
