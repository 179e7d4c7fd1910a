pub mod connection;
pub mod email;
pub mod linkedin;
pub mod name;

pub use connection::{validate_connection, CandidateInput, NormalizedConnection, ValidationOutcome};
pub use email::{normalize_email, validate_email, MAX_EMAIL_CHARS};
pub use linkedin::{normalize_linkedin_url, validate_linkedin_url, LINKEDIN_PREFIX};
pub use name::{normalize_name, validate_name, MAX_NAME_CHARS};
