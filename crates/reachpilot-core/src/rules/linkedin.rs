use crate::error::FieldError;
use url::Url;

pub const LINKEDIN_PREFIX: &str = "https://www.linkedin.com/";

const LINKEDIN_HOST: &str = "www.linkedin.com";

/// Checks an optional LinkedIn profile URL. Absent or blank input is valid.
/// The host-equality check backs up the prefix check: the `url` parser
/// separates host from path, so `www.linkedin.com.evil.com` never compares
/// equal to `www.linkedin.com`.
pub fn validate_linkedin_url(raw: Option<&str>) -> Result<(), FieldError> {
    let Some(value) = raw else {
        return Ok(());
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if !trimmed.starts_with(LINKEDIN_PREFIX) {
        return Err(FieldError::BadPrefix);
    }
    let parsed = Url::parse(trimmed).map_err(|_| FieldError::ParseError)?;
    match parsed.host_str() {
        Some(host) if host == LINKEDIN_HOST => Ok(()),
        _ => Err(FieldError::BadHost),
    }
}

/// Canonical storage form: trimmed, with blank input mapped to `None`.
pub fn normalize_linkedin_url(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_linkedin_url, validate_linkedin_url};
    use crate::error::FieldError;

    #[test]
    fn absent_or_blank_is_valid() {
        assert_eq!(validate_linkedin_url(None), Ok(()));
        assert_eq!(validate_linkedin_url(Some("")), Ok(()));
        assert_eq!(validate_linkedin_url(Some("  ")), Ok(()));
    }

    #[test]
    fn accepts_profile_urls() {
        for value in [
            "https://www.linkedin.com/in/janedoe",
            "https://www.linkedin.com/in/jane-doe-12345/",
            "  https://www.linkedin.com/company/acme  ",
        ] {
            assert_eq!(validate_linkedin_url(Some(value)), Ok(()), "{value}");
        }
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        for value in [
            "linkedin.com/in/joe",
            "http://www.linkedin.com/in/joe",
            "https://linkedin.com/in/joe",
            "https://www.linkedin.com",
        ] {
            assert_eq!(
                validate_linkedin_url(Some(value)),
                Err(FieldError::BadPrefix),
                "{value}"
            );
        }
    }

    #[test]
    fn spoofed_hosts_are_rejected() {
        // A lookalike domain can never satisfy the literal prefix, and the
        // parser keeps host separate from path for anything that does.
        for value in [
            "https://www.linkedin.com.attacker.net/in/joe",
            "https://www.linkedin.com.evil.com/",
            "https://evil.com/https://www.linkedin.com/",
        ] {
            assert_eq!(
                validate_linkedin_url(Some(value)),
                Err(FieldError::BadPrefix),
                "{value}"
            );
        }
    }

    #[test]
    fn path_segments_do_not_change_the_host() {
        assert_eq!(
            validate_linkedin_url(Some("https://www.linkedin.com/in/../redirect")),
            Ok(())
        );
    }

    #[test]
    fn normalize_trims_and_maps_blank_to_none() {
        assert_eq!(
            normalize_linkedin_url(Some(" https://www.linkedin.com/in/janedoe ")).as_deref(),
            Some("https://www.linkedin.com/in/janedoe")
        );
        assert_eq!(normalize_linkedin_url(Some("")), None);
        assert_eq!(normalize_linkedin_url(None), None);
    }
}
