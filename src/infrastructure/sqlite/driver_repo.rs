use crate::domain::entities::driver::DriverDocument;
use crate::domain::error::DomainError;
use crate::domain::ports::driver_store::DriverStore;
use crate::domain::values::timestamp::{self, TimestampValue};
use crate::infrastructure::sqlite::migrations::run_migrations;
use async_trait::async_trait;
use chrono::SecondsFormat;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, Connection, ErrorCode};
use std::sync::{Mutex, MutexGuard};

const SELECT_COLS: &str = "id, user_id, fleet_manager_id, first_name, last_name, email, phone, license_number, username, account_status, face_embedding, created_at, updated_at, last_login";

/// SQLite-backed driver store. The connection is owned by the store and
/// closed when it is dropped.
pub struct SqliteDriverStore {
    conn: Mutex<Connection>,
}

impl SqliteDriverStore {
    /// Opens (or creates) the database at `path` and applies migrations.
    /// `":memory:"` gives a private in-memory database.
    pub fn open(path: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::StoreUnavailable(format!("DB error: {e}")))?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))
            .map_err(|e| DomainError::StoreUnavailable(format!("WAL error: {e}")))?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, DomainError> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::StoreUnavailable(e.to_string()))
    }

    fn row_to_document(row: &rusqlite::Row) -> Result<DriverDocument, rusqlite::Error> {
        Ok(DriverDocument {
            id: row.get(0)?,
            user_id: row.get(1)?,
            fleet_manager_id: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            email: row.get(5)?,
            phone: row.get(6)?,
            license_number: row.get(7)?,
            username: row.get(8)?,
            account_status: row.get(9)?,
            face_embedding: row.get(10)?,
            created_at: timestamp_from_sql(row.get_ref(11)?),
            updated_at: timestamp_from_sql(row.get_ref(12)?),
            last_login: timestamp_from_sql(row.get_ref(13)?),
        })
    }
}

fn timestamp_from_sql(v: ValueRef<'_>) -> TimestampValue {
    match v {
        ValueRef::Null => TimestampValue::Absent,
        ValueRef::Integer(i) => TimestampValue::Integer(i),
        ValueRef::Real(f) => TimestampValue::Other(f.to_string()),
        ValueRef::Text(t) => TimestampValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => TimestampValue::Other(format!("<{} byte blob>", b.len())),
    }
}

fn timestamp_to_sql(v: &TimestampValue) -> SqlValue {
    match v {
        TimestampValue::Absent => SqlValue::Null,
        TimestampValue::Integer(i) => SqlValue::Integer(*i),
        TimestampValue::Text(s) => SqlValue::Text(s.clone()),
        TimestampValue::Instant(dt) => {
            SqlValue::Text(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        TimestampValue::Other(s) => match s.parse::<f64>() {
            Ok(f) => SqlValue::Real(f),
            Err(_) => SqlValue::Text(s.clone()),
        },
    }
}

fn insert_error(e: rusqlite::Error) -> DomainError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            DomainError::InvalidInput(format!("Failed to insert driver: {e}"))
        }
        _ => DomainError::StoreUnavailable(format!("Failed to insert driver: {e}")),
    }
}

#[async_trait]
impl DriverStore for SqliteDriverStore {
    async fn list_active(&self) -> Result<Vec<DriverDocument>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM drivers WHERE account_status = 'Active' ORDER BY seq",
            SELECT_COLS
        );
        let mut stmt = conn.prepare(&sql)?;
        let documents = stmt
            .query_map([], Self::row_to_document)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(documents)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<DriverDocument>, DomainError> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT {} FROM drivers WHERE user_id = ?1 ORDER BY seq LIMIT 1",
            SELECT_COLS
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![user_id], Self::row_to_document)?;
        Ok(rows.next().transpose()?)
    }

    async fn touch_login(&self, user_id: &str) -> Result<bool, DomainError> {
        let conn = self.lock()?;
        let now = timestamp::now_millis();
        let changed = conn.execute(
            "UPDATE drivers SET last_login = ?1, updated_at = ?1
             WHERE seq = (SELECT seq FROM drivers WHERE user_id = ?2 ORDER BY seq LIMIT 1)",
            params![now, user_id],
        )?;
        Ok(changed > 0)
    }

    async fn insert(&self, doc: &DriverDocument) -> Result<String, DomainError> {
        let conn = self.lock()?;
        let id = doc
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        conn.execute(
            "INSERT INTO drivers (id, user_id, fleet_manager_id, first_name, last_name, email, phone, license_number, username, account_status, face_embedding, created_at, updated_at, last_login)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                id,
                doc.user_id,
                doc.fleet_manager_id,
                doc.first_name,
                doc.last_name,
                doc.email,
                doc.phone,
                doc.license_number,
                doc.username,
                doc.account_status,
                doc.face_embedding,
                timestamp_to_sql(&doc.created_at),
                timestamp_to_sql(&doc.updated_at),
                timestamp_to_sql(&doc.last_login),
            ],
        )
        .map_err(insert_error)?;
        Ok(id)
    }
}
