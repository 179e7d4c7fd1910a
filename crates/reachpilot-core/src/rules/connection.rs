use crate::error::{Field, ValidationErrors};
use crate::rules::email::{normalize_email, validate_email};
use crate::rules::linkedin::{normalize_linkedin_url, validate_linkedin_url};
use crate::rules::name::{normalize_name, validate_name};
use serde::{Deserialize, Serialize};

/// Raw caller-supplied field values, before validation. Optional fields are
/// `Option` at this boundary; an absent email is modeled as an empty string
/// and fails validation as `required`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateInput {
    pub email: String,
    pub name: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Canonical field values ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedConnection {
    pub email: String,
    pub name: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Result of validating one candidate record. `normalized` is computed even
/// when validation fails, so a partially-valid submission can be redisplayed
/// with canonical values; callers must not persist it unless valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: ValidationErrors,
    pub normalized: NormalizedConnection,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<NormalizedConnection, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.normalized)
        } else {
            Err(self.errors)
        }
    }
}

/// Runs every field check so callers see all failures at once, then
/// normalizes. Pure and reentrant; uniqueness checks belong to the caller.
pub fn validate_connection(input: &CandidateInput) -> ValidationOutcome {
    let mut errors = ValidationErrors::new();
    if let Err(error) = validate_email(&input.email) {
        errors.insert(Field::Email, error);
    }
    if let Err(error) = validate_name(input.name.as_deref()) {
        errors.insert(Field::Name, error);
    }
    if let Err(error) = validate_linkedin_url(input.linkedin_url.as_deref()) {
        errors.insert(Field::LinkedinUrl, error);
    }

    let normalized = NormalizedConnection {
        email: normalize_email(&input.email),
        name: normalize_name(input.name.as_deref()),
        linkedin_url: normalize_linkedin_url(input.linkedin_url.as_deref()),
    };

    ValidationOutcome { errors, normalized }
}
