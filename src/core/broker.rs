use crate::core::db;
use crate::core::error::CampError;
use crate::core::store::Store;
use crate::core::envelope;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Single entry point for database access.
/// Callers are serialized in-process and each call is recorded in the audit log.
pub struct DbBroker {
    db_path: PathBuf,
    busy_timeout_secs: u64,
    audit_log_path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub actor: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

impl DbBroker {
    pub fn new(store: &Store) -> Self {
        let audit_log_path = if store.config.audit.enabled {
            Some(store.audit_log_path())
        } else {
            None
        };
        Self {
            db_path: store.db_path(),
            busy_timeout_secs: store.config.database.busy_timeout_secs,
            audit_log_path,
        }
    }

    /// Execute a closure with a serialized connection to the store's DB.
    ///
    /// The closure runs inside a transaction. The audit line is written
    /// before commit, so an operation whose event cannot be recorded is
    /// rolled back and reported as failed. Errors from the closure also
    /// roll back.
    pub fn with_conn<F, R>(&self, actor: &str, op_name: &str, f: F) -> Result<R, CampError>
    where
        F: FnOnce(&Connection) -> Result<R, CampError>,
    {
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let db_id = self
            .db_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let conn = db::db_connect(&self.db_path, self.busy_timeout_secs)?;
        let tx = conn.unchecked_transaction()?;

        let result = f(&tx);

        let status = match &result {
            Ok(_) => "success",
            Err(e) if e.is_validation() => "rejected",
            Err(CampError::NotFound(_)) => "not_found",
            Err(_) => "error",
        };
        // Dropping `tx` on this early return rolls the write back.
        self.log_event(actor, op_name, &db_id, status)?;

        let out = result?;
        tx.commit()?;
        Ok(out)
    }

    fn log_event(&self, actor: &str, op: &str, db_id: &str, status: &str) -> Result<(), CampError> {
        let Some(path) = &self.audit_log_path else {
            return Ok(());
        };

        let ev = BrokerEvent {
            ts: envelope::now_epoch_z(),
            event_id: envelope::new_event_id(),
            actor: actor.to_string(),
            op: op.to_string(),
            db_id: db_id.to_string(),
            status: status.to_string(),
        };
        let line = serde_json::to_string(&ev).map_err(|e| CampError::IoError(e.into()))?;

        let mut f = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(f, "{}", line)?;
        Ok(())
    }
}

/// Read back every audit event, oldest first.
pub fn read_audit_log(store: &Store) -> Result<Vec<BrokerEvent>, CampError> {
    let path = store.audit_log_path();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    let mut events = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        let ev: BrokerEvent =
            serde_json::from_str(line).map_err(|e| CampError::IoError(e.into()))?;
        events.push(ev);
    }
    Ok(events)
}
