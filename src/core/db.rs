use crate::core::broker::DbBroker;
use crate::core::error::CampError;
use crate::core::schemas;
use crate::core::store::Store;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub fn db_connect(db_path: &Path, busy_timeout_secs: u64) -> Result<Connection, CampError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(Duration::from_secs(busy_timeout_secs))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
    // Cascades and SET NULL on signups only fire with this on.
    conn.execute("PRAGMA foreign_keys=ON;", [])?;
    Ok(conn)
}

/// Create the store directory and the camp tables. Idempotent.
pub fn initialize_camp_db(store: &Store) -> Result<(), CampError> {
    fs::create_dir_all(&store.root)?;

    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camp.init", |conn| {
        for stmt in schemas::camp_db_schema() {
            conn.execute(&stmt, [])?;
        }
        Ok(())
    })
}

/// Stored DDL for a table or index, if it exists.
pub fn schema_sql(conn: &Connection, name: &str) -> Result<Option<String>, CampError> {
    let mut stmt = conn.prepare("SELECT sql FROM sqlite_master WHERE name = ?1")?;
    let mut rows = stmt.query([name])?;
    match rows.next()? {
        Some(row) => Ok(row.get(0)?),
        None => Ok(None),
    }
}
