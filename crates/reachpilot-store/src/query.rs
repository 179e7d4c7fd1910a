use crate::error::StoreError;
use reachpilot_core::domain::ConnectionId;
use rusqlite::types::Value;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 100;

/// Keyset position within a listing: the `created_at` and id of the last row
/// of the previous page. Rendered as `<created_at>|<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: i64,
    pub id: ConnectionId,
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.created_at, self.id)
    }
}

impl FromStr for Cursor {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((created_at, id)) = s.split_once('|') else {
            return Err(StoreError::InvalidCursor(s.to_string()));
        };
        let created_at = created_at
            .parse::<i64>()
            .map_err(|_| StoreError::InvalidCursor(s.to_string()))?;
        let id =
            ConnectionId::from_str(id).map_err(|_| StoreError::InvalidCursor(s.to_string()))?;
        Ok(Self { created_at, id })
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConnectionQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<Cursor>,
}

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl ConnectionQuery {
    /// Requested page size clamped to 1..=MAX_LIMIT; out-of-range values
    /// fall back to the default rather than erroring.
    pub fn effective_limit(&self) -> i64 {
        match self.limit {
            Some(limit) if limit >= 1 => limit.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn to_sql(&self, owner_email: &str) -> SqlQuery {
        let mut clauses = vec!["created_by_email = ?".to_string()];
        let mut params: Vec<Value> = vec![Value::from(owner_email.to_string())];

        if let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            clauses.push("(email LIKE ? ESCAPE '\\' OR name LIKE ? ESCAPE '\\')".to_string());
            let like = format!("%{}%", escape_like(term));
            params.push(Value::from(like.clone()));
            params.push(Value::from(like));
        }

        if let Some(cursor) = self.cursor {
            clauses.push("(created_at < ? OR (created_at = ? AND id < ?))".to_string());
            params.push(Value::from(cursor.created_at));
            params.push(Value::from(cursor.created_at));
            params.push(Value::from(cursor.id.to_string()));
        }

        let mut sql = String::from(
            "SELECT id, created_by_email, email, name, linkedin_url, created_at, updated_at FROM connections WHERE ",
        );
        sql.push_str(&clauses.join(" AND "));
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
        // One extra row so the repo can tell whether another page exists.
        params.push(Value::from(self.effective_limit() + 1));

        SqlQuery { sql, params }
    }
}

/// `%`, `_`, and `\` in a search term match themselves, not as LIKE
/// wildcards.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{ConnectionQuery, Cursor, DEFAULT_LIMIT, MAX_LIMIT};
    use reachpilot_core::domain::ConnectionId;
    use std::str::FromStr;

    #[test]
    fn limit_is_clamped() {
        let mut query = ConnectionQuery::default();
        assert_eq!(query.effective_limit(), DEFAULT_LIMIT);
        query.limit = Some(0);
        assert_eq!(query.effective_limit(), DEFAULT_LIMIT);
        query.limit = Some(-3);
        assert_eq!(query.effective_limit(), DEFAULT_LIMIT);
        query.limit = Some(10);
        assert_eq!(query.effective_limit(), 10);
        query.limit = Some(500);
        assert_eq!(query.effective_limit(), MAX_LIMIT);
    }

    #[test]
    fn cursor_roundtrips() {
        let cursor = Cursor {
            created_at: 1_700_000_000,
            id: ConnectionId::new(),
        };
        let parsed = Cursor::from_str(&cursor.to_string()).expect("parse cursor");
        assert_eq!(parsed, cursor);
    }

    #[test]
    fn malformed_cursors_are_rejected() {
        for raw in ["", "123", "abc|def", "123|not-a-uuid", "|"] {
            assert!(Cursor::from_str(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn search_wildcards_are_escaped() {
        let query = ConnectionQuery {
            search: Some("100%_done".to_string()),
            ..Default::default()
        };
        let compiled = query.to_sql("owner@example.com");
        assert!(compiled.sql.contains("ESCAPE '\\'"));
        let rusqlite::types::Value::Text(like) = &compiled.params[1] else {
            panic!("expected text param, got {:?}", compiled.params[1]);
        };
        assert_eq!(like, "%100\\%\\_done%");
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ConnectionQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let compiled = query.to_sql("owner@example.com");
        assert!(!compiled.sql.contains("LIKE"));
        assert_eq!(compiled.params.len(), 2);
    }
}
