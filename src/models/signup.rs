use crate::core::broker::DbBroker;
use crate::core::error::CampError;
use crate::core::schemas::{SIGNUP_MAX_TIME, SIGNUP_MIN_TIME};
use crate::core::store::Store;
use crate::models::activity;
use crate::models::camper;
use crate::models::serialize::{self, SignupNode};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use std::fmt;

/// Join row between a camper and an activity at a given hour.
/// `camper_id` is `None` once the camper has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signup {
    id: i64,
    time: i64,
    camper_id: Option<i64>,
    activity_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    time: i64,
    camper_id: i64,
    activity_id: i64,
}

pub fn validate_signup_time(time: i64) -> Result<i64, CampError> {
    if (SIGNUP_MIN_TIME..=SIGNUP_MAX_TIME).contains(&time) {
        return Ok(time);
    }
    Err(CampError::ValidationError(format!(
        "time must be between {} and {}, got {}",
        SIGNUP_MIN_TIME, SIGNUP_MAX_TIME, time
    )))
}

impl NewSignup {
    pub fn new(time: i64, camper_id: i64, activity_id: i64) -> Result<Self, CampError> {
        Ok(Self {
            time: validate_signup_time(time)?,
            camper_id,
            activity_id,
        })
    }
}

impl Signup {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn camper_id(&self) -> Option<i64> {
        self.camper_id
    }

    pub fn activity_id(&self) -> i64 {
        self.activity_id
    }

    pub fn set_time(&mut self, time: i64) -> Result<(), CampError> {
        self.time = validate_signup_time(time)?;
        Ok(())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            time: row.get("time")?,
            camper_id: row.get("camper_id")?,
            activity_id: row.get("activity_id")?,
        })
    }
}

impl fmt::Display for Signup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Signup {}>", self.id)
    }
}

const SIGNUP_COLUMNS: &str = "id, time, camper_id, activity_id";

fn load_signup(conn: &Connection, id: i64) -> Result<Signup, CampError> {
    conn.query_row(
        &format!("SELECT {} FROM signups WHERE id = ?1", SIGNUP_COLUMNS),
        params![id],
        Signup::from_row,
    )
    .optional()?
    .ok_or_else(|| CampError::NotFound(format!("signup {}", id)))
}

fn query_signups(conn: &Connection, filter: &str, key: i64) -> Result<Vec<Signup>, CampError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM signups WHERE {} = ?1 ORDER BY id",
        SIGNUP_COLUMNS, filter
    ))?;
    let rows = stmt.query_map(params![key], Signup::from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn signups_for_camper(conn: &Connection, camper_id: i64) -> Result<Vec<Signup>, CampError> {
    query_signups(conn, "camper_id", camper_id)
}

pub(crate) fn signups_for_activity(
    conn: &Connection,
    activity_id: i64,
) -> Result<Vec<Signup>, CampError> {
    query_signups(conn, "activity_id", activity_id)
}

/// Sign a camper up for an activity. Both must already exist.
pub fn create_signup(store: &Store, new: NewSignup) -> Result<Signup, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "signup.create", |conn| {
        camper::load_camper(conn, new.camper_id)?;
        activity::load_activity(conn, new.activity_id)?;
        conn.execute(
            "INSERT INTO signups(time, camper_id, activity_id) VALUES(?1, ?2, ?3)",
            params![new.time, new.camper_id, new.activity_id],
        )?;
        Ok(Signup {
            id: conn.last_insert_rowid(),
            time: new.time,
            camper_id: Some(new.camper_id),
            activity_id: new.activity_id,
        })
    })
}

pub fn get_signup(store: &Store, id: i64) -> Result<Signup, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "signup.get", |conn| load_signup(conn, id))
}

pub fn list_signups(store: &Store) -> Result<Vec<Signup>, CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "signup.list", |conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM signups ORDER BY id",
            SIGNUP_COLUMNS
        ))?;
        let rows = stmt.query_map([], Signup::from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    })
}

/// Persist the signup's time. References are fixed at creation.
pub fn update_signup(store: &Store, signup: &Signup) -> Result<(), CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "signup.update", |conn| {
        let changed = conn.execute(
            "UPDATE signups SET time = ?1 WHERE id = ?2",
            params![signup.time, signup.id],
        )?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("signup {}", signup.id)));
        }
        Ok(())
    })
}

pub fn delete_signup(store: &Store, id: i64) -> Result<(), CampError> {
    let broker = DbBroker::new(store);
    broker.with_conn("campsite", "signup.delete", |conn| {
        let changed = conn.execute("DELETE FROM signups WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CampError::NotFound(format!("signup {}", id)));
        }
        Ok(())
    })
}

pub fn serialize_signup(store: &Store, id: i64) -> Result<serde_json::Value, CampError> {
    let broker = DbBroker::new(store);
    let node = broker.with_conn("campsite", "signup.serialize", |conn| {
        let signup = load_signup(conn, id)?;
        let camper = match signup.camper_id {
            Some(camper_id) => camper::find_camper(conn, camper_id)?,
            None => None,
        };
        let activity = activity::load_activity(conn, signup.activity_id)?;
        Ok(SignupNode {
            signup,
            camper,
            activity: Some(activity),
        })
    })?;
    serialize::to_value(&node)
}
