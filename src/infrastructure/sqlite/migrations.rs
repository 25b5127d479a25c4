use crate::domain::error::DomainError;
use rusqlite::Connection;

/// Timestamp columns carry no declared type so each value keeps the storage
/// class it was written with (INTEGER, TEXT, REAL or NULL).
pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS drivers (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            user_id TEXT,
            fleet_manager_id TEXT,
            first_name TEXT,
            last_name TEXT,
            email TEXT,
            phone TEXT,
            license_number TEXT,
            username TEXT,
            account_status TEXT,
            face_embedding TEXT,
            created_at,
            updated_at,
            last_login
        );

        CREATE INDEX IF NOT EXISTS idx_drivers_user_id ON drivers(user_id);
        CREATE INDEX IF NOT EXISTS idx_drivers_status ON drivers(account_status);
        "
    ).map_err(|e| DomainError::StoreUnavailable(format!("Migration failed: {e}")))
}
