use crate::domain::ids::ConnectionId;
use serde::{Deserialize, Serialize};

/// A persisted contact record, owned by the principal named in
/// `created_by_email`. Field values are stored in canonical form; callers
/// must run candidate input through the validation rules before persisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub created_by_email: String,
    pub email: String,
    pub name: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
