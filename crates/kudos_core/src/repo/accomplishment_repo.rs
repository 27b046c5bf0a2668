//! Accomplishment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/delete/sorted-fetch APIs over `accomplishments` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Rows are decoded through `Accomplishment::restore`; corrupt rows are
//!   reported as `RepoError::InvalidData` instead of masked.
//! - `list` ordering is by `created_at`, ties broken by `uuid ASC`.

use crate::db::DbError;
use crate::model::accomplishment::{Accomplishment, AccomplishmentId, ConstructionError};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACCOMPLISHMENT_SELECT_SQL: &str = "SELECT
    uuid,
    text,
    photo_data,
    color,
    created_at
FROM accomplishments";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for accomplishment persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ConstructionError),
    Db(DbError),
    NotFound(AccomplishmentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "accomplishment not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted accomplishment data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ConstructionError> for RepoError {
    fn from(value: ConstructionError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Date ordering for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Repository interface consumed by services and the capture session.
pub trait AccomplishmentRepository {
    fn insert(&self, item: &Accomplishment) -> RepoResult<AccomplishmentId>;
    fn delete(&self, id: AccomplishmentId) -> RepoResult<()>;
    fn get(&self, id: AccomplishmentId) -> RepoResult<Option<Accomplishment>>;
    fn list(&self, order: SortOrder) -> RepoResult<Vec<Accomplishment>>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed accomplishment repository.
pub struct SqliteAccomplishmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccomplishmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccomplishmentRepository for SqliteAccomplishmentRepository<'_> {
    fn insert(&self, item: &Accomplishment) -> RepoResult<AccomplishmentId> {
        self.conn.execute(
            "INSERT INTO accomplishments (
                uuid,
                text,
                photo_data,
                color,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                item.id().to_string(),
                item.text(),
                item.photo_data(),
                item.color(),
                item.date().timestamp_millis(),
            ],
        )?;

        Ok(item.id())
    }

    fn delete(&self, id: AccomplishmentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM accomplishments WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get(&self, id: AccomplishmentId) -> RepoResult<Option<Accomplishment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOMPLISHMENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_accomplishment_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, order: SortOrder) -> RepoResult<Vec<Accomplishment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACCOMPLISHMENT_SELECT_SQL} ORDER BY created_at {}, uuid ASC;",
            order.as_sql()
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_accomplishment_row(row)?);
        }

        Ok(items)
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM accomplishments;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

/// Accomplishment repository that owns its connection.
///
/// For long-lived holders such as a process-wide capture session.
pub struct OwnedSqliteAccomplishmentRepository {
    conn: Connection,
}

impl OwnedSqliteAccomplishmentRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn borrowed(&self) -> SqliteAccomplishmentRepository<'_> {
        SqliteAccomplishmentRepository::new(&self.conn)
    }
}

impl AccomplishmentRepository for OwnedSqliteAccomplishmentRepository {
    fn insert(&self, item: &Accomplishment) -> RepoResult<AccomplishmentId> {
        self.borrowed().insert(item)
    }

    fn delete(&self, id: AccomplishmentId) -> RepoResult<()> {
        self.borrowed().delete(id)
    }

    fn get(&self, id: AccomplishmentId) -> RepoResult<Option<Accomplishment>> {
        self.borrowed().get(id)
    }

    fn list(&self, order: SortOrder) -> RepoResult<Vec<Accomplishment>> {
        self.borrowed().list(order)
    }

    fn count(&self) -> RepoResult<u64> {
        self.borrowed().count()
    }
}

fn parse_accomplishment_row(row: &Row<'_>) -> RepoResult<Accomplishment> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in accomplishments.uuid"
        ))
    })?;

    let created_at: i64 = row.get("created_at")?;
    let date = DateTime::<Utc>::from_timestamp_millis(created_at).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{created_at}` in accomplishments.created_at"
        ))
    })?;

    Accomplishment::restore(
        id,
        row.get("text")?,
        row.get("photo_data")?,
        row.get("color")?,
        date,
    )
    .map_err(|err| {
        RepoError::InvalidData(format!("accomplishment `{id}` failed validation: {err}"))
    })
}
