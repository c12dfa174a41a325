use chrono::NaiveDate;

use crate::{
    model::api::IdValue,
    server::{
        error::{auth::AuthError, validation::ValidationError, Error},
        util::date::parse_date,
    },
};

const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// 3 to 30 characters of letters, digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    (3..=30).contains(&name.chars().count())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `local@domain.tld` with a purely alphabetic top-level domain of two or more letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// 8 to 128 characters mixing lower, upper, digit and one of `@$!%*?&`, nothing else.
pub fn is_strong_password(password: &str) -> bool {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));

    allowed
        && (8..=128).contains(&password.chars().count())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

/// Upper-cases the first letter and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Validates first name, last name and date of birth, appending a message per failure.
pub fn check_person(
    first_name: &str,
    last_name: &str,
    date_of_birth: &str,
    messages: &mut Vec<String>,
) -> Option<NaiveDate> {
    if first_name.is_empty() {
        messages.push("First name is required".to_string());
    } else if !is_valid_name(first_name) {
        messages.push("Invalid First name format".to_string());
    }

    if last_name.is_empty() {
        messages.push("Last name is required".to_string());
    } else if !is_valid_name(last_name) {
        messages.push("Invalid Last name format".to_string());
    }

    if date_of_birth.is_empty() {
        messages.push("Date of birth is required".to_string());
        return None;
    }

    match parse_date(date_of_birth) {
        Ok(date) => Some(date),
        Err(_) => {
            messages.push("Invalid date format".to_string());
            None
        }
    }
}

/// Fails with `RequiredFields` when any value is blank.
pub fn require_filled(values: &[&str]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::RequiredFields);
    }

    Ok(())
}

/// Missing or blank ids are `RequiredFields`, unparseable ones `InvalidNumber`.
pub fn require_id(value: Option<&IdValue>, field: &'static str) -> Result<i32, ValidationError> {
    match value {
        None => Err(ValidationError::RequiredFields),
        Some(id) if id.is_blank() => Err(ValidationError::RequiredFields),
        Some(id) => id.to_id().ok_or(ValidationError::InvalidNumber(field)),
    }
}

/// The owner id carried by a create payload must be present and equal the caller.
pub fn ensure_owner(payload_user_id: i32, user_id: i32) -> Result<(), Error> {
    if payload_user_id < 1 {
        return Err(ValidationError::RequiredFields.into());
    }

    if payload_user_id != user_id {
        return Err(AuthError::OwnerMismatch {
            payload: payload_user_id,
            user_id,
        }
        .into());
    }

    Ok(())
}
