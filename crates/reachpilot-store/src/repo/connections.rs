use crate::error::{Result, StoreError};
use crate::query::{ConnectionQuery, Cursor};
use reachpilot_core::domain::{Connection, ConnectionId};
use reachpilot_core::rules::{validate_connection, CandidateInput};
use rusqlite::{params, params_from_iter};
use std::str::FromStr;

/// Partial update; `None` keeps the stored value, `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct ConnectionUpdate {
    pub email: Option<String>,
    pub name: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
}

impl ConnectionUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.linkedin_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionPage {
    pub connections: Vec<Connection>,
    pub has_more: bool,
    pub next_cursor: Option<Cursor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionStats {
    pub total: i64,
    pub with_linkedin: i64,
    pub recent: i64,
}

/// Connection records scoped by owning principal; every operation takes the
/// owner's canonical email and never reads or writes across owners.
pub struct ConnectionsRepo<'a> {
    conn: &'a rusqlite::Connection,
}

impl<'a> ConnectionsRepo<'a> {
    pub fn new(conn: &'a rusqlite::Connection) -> Self {
        Self { conn }
    }

    pub fn create(
        &self,
        now_utc: i64,
        owner_email: &str,
        input: CandidateInput,
    ) -> Result<Connection> {
        let tx = self.conn.unchecked_transaction()?;
        let created = create_inner(&tx, now_utc, owner_email, input)?;
        tx.commit()?;
        Ok(created)
    }

    pub fn get(&self, owner_email: &str, id: ConnectionId) -> Result<Option<Connection>> {
        get_inner(self.conn, owner_email, id)
    }

    pub fn update(
        &self,
        now_utc: i64,
        owner_email: &str,
        id: ConnectionId,
        update: ConnectionUpdate,
    ) -> Result<Connection> {
        let tx = self.conn.unchecked_transaction()?;
        let updated = update_inner(&tx, now_utc, owner_email, id, update)?;
        tx.commit()?;
        Ok(updated)
    }

    pub fn delete(&self, owner_email: &str, id: ConnectionId) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM connections WHERE id = ?1 AND created_by_email = ?2;",
            params![id.to_string(), owner_email],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn list(&self, owner_email: &str, query: &ConnectionQuery) -> Result<ConnectionPage> {
        let compiled = query.to_sql(owner_email);
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let mut rows = stmt.query(params_from_iter(compiled.params))?;
        let mut connections = Vec::new();
        while let Some(row) = rows.next()? {
            connections.push(connection_from_row(row)?);
        }

        let limit = query.effective_limit() as usize;
        let has_more = connections.len() > limit;
        connections.truncate(limit);
        let next_cursor = if has_more {
            connections.last().map(|last| Cursor {
                created_at: last.created_at,
                id: last.id,
            })
        } else {
            None
        };

        Ok(ConnectionPage {
            connections,
            has_more,
            next_cursor,
        })
    }

    pub fn stats(&self, owner_email: &str, since_utc: i64) -> Result<ConnectionStats> {
        let (total, with_linkedin, recent) = self.conn.query_row(
            "SELECT COUNT(*),
                    COUNT(linkedin_url),
                    COUNT(CASE WHEN created_at >= ?2 THEN 1 END)
             FROM connections WHERE created_by_email = ?1;",
            params![owner_email, since_utc],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(ConnectionStats {
            total,
            with_linkedin,
            recent,
        })
    }
}

fn create_inner(
    conn: &rusqlite::Connection,
    now_utc: i64,
    owner_email: &str,
    input: CandidateInput,
) -> Result<Connection> {
    let normalized = validate_connection(&input).into_result()?;

    if find_id_by_email(conn, owner_email, &normalized.email)?.is_some() {
        return Err(StoreError::DuplicateEmail(normalized.email));
    }

    let connection = Connection {
        id: ConnectionId::new(),
        created_by_email: owner_email.to_string(),
        email: normalized.email,
        name: normalized.name,
        linkedin_url: normalized.linkedin_url,
        created_at: now_utc,
        updated_at: now_utc,
    };

    conn.execute(
        "INSERT INTO connections (id, created_by_email, email, name, linkedin_url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            connection.id.to_string(),
            connection.created_by_email,
            connection.email,
            connection.name,
            connection.linkedin_url,
            connection.created_at,
            connection.updated_at,
        ],
    )
    .map_err(|err| constraint_to_duplicate(err, &connection.email))?;

    Ok(connection)
}

fn update_inner(
    conn: &rusqlite::Connection,
    now_utc: i64,
    owner_email: &str,
    id: ConnectionId,
    update: ConnectionUpdate,
) -> Result<Connection> {
    let existing =
        get_inner(conn, owner_email, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    // Unspecified fields keep their stored values, so validation always sees
    // the full candidate record.
    let candidate = CandidateInput {
        email: update.email.unwrap_or_else(|| existing.email.clone()),
        name: match update.name {
            Some(value) => value,
            None => existing.name.clone(),
        },
        linkedin_url: match update.linkedin_url {
            Some(value) => value,
            None => existing.linkedin_url.clone(),
        },
    };
    let normalized = validate_connection(&candidate).into_result()?;

    if normalized.email != existing.email {
        if let Some(other) = find_id_by_email(conn, owner_email, &normalized.email)? {
            if other != id {
                return Err(StoreError::DuplicateEmail(normalized.email));
            }
        }
    }

    let connection = Connection {
        id,
        created_by_email: existing.created_by_email,
        email: normalized.email,
        name: normalized.name,
        linkedin_url: normalized.linkedin_url,
        created_at: existing.created_at,
        updated_at: now_utc,
    };

    conn.execute(
        "UPDATE connections SET email = ?3, name = ?4, linkedin_url = ?5, updated_at = ?6
         WHERE id = ?1 AND created_by_email = ?2;",
        params![
            connection.id.to_string(),
            connection.created_by_email,
            connection.email,
            connection.name,
            connection.linkedin_url,
            connection.updated_at,
        ],
    )
    .map_err(|err| constraint_to_duplicate(err, &connection.email))?;

    Ok(connection)
}

fn get_inner(
    conn: &rusqlite::Connection,
    owner_email: &str,
    id: ConnectionId,
) -> Result<Option<Connection>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_by_email, email, name, linkedin_url, created_at, updated_at
         FROM connections WHERE id = ?1 AND created_by_email = ?2;",
    )?;
    let mut rows = stmt.query(params![id.to_string(), owner_email])?;
    if let Some(row) = rows.next()? {
        Ok(Some(connection_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn find_id_by_email(
    conn: &rusqlite::Connection,
    owner_email: &str,
    email: &str,
) -> Result<Option<ConnectionId>> {
    let mut stmt =
        conn.prepare("SELECT id FROM connections WHERE created_by_email = ?1 AND email = ?2;")?;
    let mut rows = stmt.query(params![owner_email, email])?;
    if let Some(row) = rows.next()? {
        let raw: String = row.get(0)?;
        let id = ConnectionId::from_str(&raw).map_err(|_| StoreError::InvalidId(raw))?;
        Ok(Some(id))
    } else {
        Ok(None)
    }
}

fn connection_from_row(row: &rusqlite::Row<'_>) -> Result<Connection> {
    let raw_id: String = row.get(0)?;
    let id = ConnectionId::from_str(&raw_id).map_err(|_| StoreError::InvalidId(raw_id))?;
    Ok(Connection {
        id,
        created_by_email: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        linkedin_url: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn constraint_to_duplicate(err: rusqlite::Error, email: &str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::Sql(err)
}
