use crate::error::FieldError;

/// Practical upper bound for an address: 64-char local part, `@`, 255-char
/// domain.
pub const MAX_EMAIL_CHARS: usize = 320;

const LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Checks a contact email. The shape check is an RFC-like simplification:
/// allowed local-part characters, one `@`, then dot-separated DNS labels.
pub fn validate_email(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    if !has_email_shape(trimmed) {
        return Err(FieldError::Format);
    }
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Err(FieldError::TooLong {
            max: MAX_EMAIL_CHARS,
        });
    }
    Ok(())
}

/// Canonical storage form: trimmed and ASCII-lowercased. Total; blank input
/// yields an empty string.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn has_email_shape(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !local.chars().all(is_local_char) {
        return false;
    }
    domain.split('.').all(is_dns_label)
}

fn is_local_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(ch)
}

fn is_dns_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.is_empty() || bytes.len() > 63 {
        return false;
    }
    // Hyphens are internal only.
    if !bytes[0].is_ascii_alphanumeric() || !bytes[bytes.len() - 1].is_ascii_alphanumeric() {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

#[cfg(test)]
mod tests {
    use super::{normalize_email, validate_email, MAX_EMAIL_CHARS};
    use crate::error::FieldError;

    #[test]
    fn blank_input_is_required() {
        assert_eq!(validate_email(""), Err(FieldError::Required));
        assert_eq!(validate_email("   "), Err(FieldError::Required));
    }

    #[test]
    fn missing_at_sign_is_a_format_error() {
        for value in ["plain", "user.example.com", "a b c"] {
            assert_eq!(validate_email(value), Err(FieldError::Format), "{value}");
        }
    }

    #[test]
    fn accepts_common_addresses() {
        for value in [
            "user@example.com",
            "first.last@sub.example.co",
            "o'brien+hr@example.com",
            "a@b",
            "  padded@example.com  ",
        ] {
            assert_eq!(validate_email(value), Ok(()), "{value}");
        }
    }

    #[test]
    fn rejects_malformed_domains() {
        for value in [
            "user@",
            "@example.com",
            "user@-example.com",
            "user@example-.com",
            "user@example..com",
            "user@example.com.",
            "user@exa mple.com",
            "user@@example.com",
        ] {
            assert_eq!(validate_email(value), Err(FieldError::Format), "{value}");
        }
    }

    #[test]
    fn rejects_oversized_labels() {
        let label = "a".repeat(64);
        let value = format!("user@{label}.com");
        assert_eq!(validate_email(&value), Err(FieldError::Format));
    }

    #[test]
    fn overlong_address_is_too_long() {
        let value = format!("{}@b.com", "a".repeat(321));
        assert_eq!(
            validate_email(&value),
            Err(FieldError::TooLong {
                max: MAX_EMAIL_CHARS
            })
        );
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Foo@BAR.com "), "foo@bar.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_email("  Jane.Doe@Corp.COM ");
        assert_eq!(normalize_email(&once), once);
    }
}
