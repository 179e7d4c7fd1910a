use crate::error::FieldError;

pub const MAX_NAME_CHARS: usize = 100;

/// Checks an optional display name. Absent or blank input is valid.
pub fn validate_name(raw: Option<&str>) -> Result<(), FieldError> {
    let Some(value) = raw else {
        return Ok(());
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(FieldError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if !trimmed.chars().all(is_name_char) {
        return Err(FieldError::InvalidChars);
    }
    Ok(())
}

/// Canonical storage form: trimmed, with blank input mapped to `None` so
/// storage can tell "no name" from "empty name".
pub fn normalize_name(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_whitespace() || matches!(ch, '-' | '\'' | '.')
}
