use crate::core::broker::DbBroker;
use crate::core::error::CampError;
use crate::core::schemas::{CAMPER_MAX_AGE, CAMPER_MIN_AGE};
use crate::core::store::Store;
use crate::models::activity::{self, Activity};
use crate::models::serialize::{self, CamperTree};
use crate::models::signup::{self, Signup};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use std::fmt;

/// A camper. `name` and `age` are only reachable through validating setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Camper {
    id: i64,
    name: String,
    age: i64,
}

/// Validated input for a camper that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCamper {
    name: String,
    age: i64,
}

pub fn validate_camper_name(name: &str) -> Result<String, CampError> {
    if name.is_empty() {
        return Err(CampError::ValidationError(
            "camper must have a name".to_string(),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_camper_age(age: i64) -> Result<i64, CampError> {
    if (CAMPER_MIN_AGE..=CAMPER_MAX_AGE).contains(&age) {
        return Ok(age);
    }
    Err(CampError::ValidationError(format!(
        "age must be between {} and {}, got {}",
        CAMPER_MIN_AGE, CAMPER_MAX_AGE, age
    )))
}

impl NewCamper {
    pub fn new(name: &str, age: i64) -> Result<Self, CampError> {
        Ok(Self {
            name: validate_camper_name(name)?,
            age: validate_camper_age(age)?,
        })
    }
}

impl Camper {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), CampError> {
        self.name = validate_camper_name(name)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> Result<(), CampError> {
        self.age = validate_camper_age(age)?;
        Ok(())
    }

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
        })
    }
}

impl fmt::Display for Camper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Camper {}: {}>", self.id, self.name)
    }
}

pub(crate) fn find_camper(conn: &Connection, id: i64) -> Result<Option<Camper>, CampError> {
    let camper = conn
        .query_row(
            "SELECT id, name, age FROM campers WHERE id = ?1",
            params![id],
            Camper::from_row,
        )
        .optional()?;
    Ok(camper)
}

pub(crate) fn load_camper(conn: &Connection, id: i64) -> Result<Camper, CampError> {
    find_camper(conn, id)?.ok_or_else(|| CampError::NotFound(format!("camper {}", id)))
}

pub fn create_camper(store: &Store, new: NewCamper) -> Result<Camper, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.create", |conn| {
        conn.execute(
            "INSERT INTO campers(name, age) VALUES(?1, ?2)",
            params![new.name, new.age],
        )?;
        Ok(Camper {
            id: conn.last_insert_rowid(),
            name: new.name,
            age: new.age,
        })
    })
}

pub fn get_camper(store: &Store, id: i64) -> Result<Camper, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.get", |conn| load_camper(conn, id))
}

pub fn list_campers(store: &Store) -> Result<Vec<Camper>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.list", |conn| {
        let mut stmt = conn.prepare("SELECT id, name, age FROM campers ORDER BY id")?;
        let rows = stmt.query_map([], Camper::from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// Persist the current name and age of an existing camper.
pub fn update_camper(store: &Store, camper: &Camper) -> Result<(), CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.update", |conn| {
        let changed = conn.execute(
            "UPDATE campers SET name = ?1, age = ?2 WHERE id = ?3",
            params![camper.name, camper.age, camper.id],
        )?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("camper {}", camper.id)));
        }
        Ok(())
    })
}

/// Delete a camper. Their signups stay, with `camper_id` cleared.
pub fn delete_camper(store: &Store, id: i64) -> Result<(), CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.delete", |conn| {
        let changed = conn.execute("DELETE FROM campers WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("camper {}", id)));
        }
        Ok(())
    })
}

pub fn camper_signups(store: &Store, id: i64) -> Result<Vec<Signup>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.signups", |conn| {
        load_camper(conn, id)?;
        signup::signups_for_camper(conn, id)
    })
}

/// Activities this camper is signed up for, one entry per signup.
pub fn camper_activities(store: &Store, id: i64) -> Result<Vec<Activity>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "camper.activities", |conn| {
        load_camper(conn, id)?;
        activities_via_signups(conn, id)
    })
}

pub(crate) fn activities_via_signups(
    conn: &Connection,
    camper_id: i64,
) -> Result<Vec<Activity>, CampError> {
    let mut stmt = conn.prepare(
        "SELECT a.id AS id, a.name AS name, a.difficulty AS difficulty FROM signups s
         JOIN activities a ON a.id = s.activity_id
         WHERE s.camper_id = ?1
         ORDER BY s.id",
    )?;
    let rows = stmt.query_map(params![camper_id], Activity::from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn serialize_camper(store: &Store, id: i64) -> Result<serde_json::Value, CampError> {
    let broker = DbBroker::new(store);
    let tree = broker.with_conn("campsite", "camper.serialize", |conn| {
        let camper = load_camper(conn, id)?;
        let mut signups = Vec::new();
        for s in signup::signups_for_camper(conn, id)? {
            let activity = activity::load_activity(conn, s.activity_id())?;
            signups.push(serialize::SignupNode::with_activity(s, activity));
        }
        Ok(CamperTree { camper, signups })
    })?;
    serialize::to_value(&tree)
}
