use crate::core::broker::DbBroker;
use crate::core::error::CampError;
use crate::core::store::Store;
use crate::models::camper::{self, Camper};
use crate::models::serialize::{self, ActivityTree};
use crate::models::signup::{self, Signup};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    id: i64,
    name: String,
    difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity<'a> {
    pub name: &'a str,
    pub difficulty: i64,
}

impl Activity {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> i64 {
        self.difficulty
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_difficulty(&mut self, difficulty: i64) {
        self.difficulty = difficulty;
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            difficulty: row.get("difficulty")?,
        })
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Activity {}: {}>", self.id, self.name)
    }
}

pub(crate) fn load_activity(conn: &Connection, id: i64) -> Result<Activity, CampError> {
    conn.query_row(
        "SELECT id, name, difficulty FROM activities WHERE id = ?1",
        params![id],
        Activity::from_row,
    )
    .optional()?
    .ok_or_else(|| CampError::NotFound(format!("activity {}", id)))
}

pub fn create_activity(store: &Store, new: NewActivity<'_>) -> Result<Activity, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.create", |conn| {
        conn.execute(
            "INSERT INTO activities(name, difficulty) VALUES(?1, ?2)",
            params![new.name, new.difficulty],
        )?;
        Ok(Activity {
            id: conn.last_insert_rowid(),
            name: new.name.to_string(),
            difficulty: new.difficulty,
        })
    })
}

pub fn get_activity(store: &Store, id: i64) -> Result<Activity, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.get", |conn| load_activity(conn, id))
}

pub fn list_activities(store: &Store) -> Result<Vec<Activity>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.list", |conn| {
        let mut stmt = conn.prepare("SELECT id, name, difficulty FROM activities ORDER BY id")?;
        let rows = stmt.query_map([], Activity::from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

pub fn update_activity(store: &Store, activity: &Activity) -> Result<(), CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.update", |conn| {
        let changed = conn.execute(
            "UPDATE activities SET name = ?1, difficulty = ?2 WHERE id = ?3",
            params![activity.name, activity.difficulty, activity.id],
        )?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("activity {}", activity.id)));
        }
        Ok(())
    })
}

/// Delete an activity together with every signup for it.
/// Returns how many signups went with it.
pub fn delete_activity(store: &Store, id: i64) -> Result<usize, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.delete", |conn| {
        let dependents: i64 = conn.query_row(
            "SELECT COUNT(*) FROM signups WHERE activity_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        let changed = conn.execute("DELETE FROM activities WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("activity {}", id)));
        }
        Ok(dependents as usize)
    })
}

pub fn activity_signups(store: &Store, id: i64) -> Result<Vec<Signup>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.signups", |conn| {
        load_activity(conn, id)?;
        signup::signups_for_activity(conn, id)
    })
}

/// Campers signed up for this activity, one entry per signup.
/// Signups whose camper was deleted contribute nothing.
pub fn activity_campers(store: &Store, id: i64) -> Result<Vec<Camper>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "activity.campers", |conn| {
        load_activity(conn, id)?;
        let mut stmt = conn.prepare(
            "SELECT c.id AS id, c.name AS name, c.age AS age FROM signups s
             JOIN campers c ON c.id = s.camper_id
             WHERE s.activity_id = ?1
             ORDER BY s.id",
        )?;
        let rows = stmt.query_map(params![id], Camper::from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

pub fn serialize_activity(store: &Store, id: i64) -> Result<serde_json::Value, CampError> {
    let broker = DbBroker::new(store);
    let tree = broker.with_conn("campsite", "activity.serialize", |conn| {
        let activity = load_activity(conn, id)?;
        let mut signups = Vec::new();
        for s in signup::signups_for_activity(conn, id)? {
            let camper = match s.camper_id() {
                Some(camper_id) => camper::find_camper(conn, camper_id)?,
                None => None,
            };
            signups.push(serialize::SignupNode::with_camper(s, camper));
        }
        Ok(ActivityTree { activity, signups })
    })?;
    serialize::to_value(&tree)
}
