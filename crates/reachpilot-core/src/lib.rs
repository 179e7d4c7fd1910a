pub mod domain;
pub mod dto;
pub mod error;
pub mod rules;

pub use domain::{Connection, ConnectionId};
pub use dto::{ConnectionPageDto, ConnectionStatsDto, ValidationReportDto};
pub use error::{Field, FieldError, ValidationErrors};
pub use rules::{
    normalize_email, normalize_linkedin_url, normalize_name, validate_connection, validate_email,
    validate_linkedin_url, validate_name, CandidateInput, NormalizedConnection, ValidationOutcome,
};
