use crate::domain::Connection;
use crate::rules::{NormalizedConnection, ValidationOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page of a connection listing, with an opaque keyset cursor when more
/// rows remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionPageDto {
    pub data: Vec<Connection>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatsDto {
    pub total: i64,
    pub with_linkedin: i64,
    pub added_this_month: i64,
}

/// Serializable validation outcome: a field-keyed error map plus the
/// canonical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReportDto {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, String>,
    pub normalized: NormalizedConnection,
}

impl From<&ValidationOutcome> for ValidationReportDto {
    fn from(outcome: &ValidationOutcome) -> Self {
        let errors = outcome
            .errors
            .iter()
            .map(|(field, error)| (field.as_str(), error.to_string()))
            .collect();
        Self {
            is_valid: outcome.is_valid(),
            errors,
            normalized: outcome.normalized.clone(),
        }
    }
}
