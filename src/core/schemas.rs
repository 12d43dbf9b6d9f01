//! Database schema for the camp store.
//!
//! Three tables live in one SQLite file:
//! 1. activities: what campers can sign up for.
//! 2. campers: who signs up (name required, age 8..=18).
//! 3. signups: join rows, one camper at one activity at an hour of the day.
//!
//! Constraint names come from `naming`, never from string literals.

use crate::core::naming;

pub const ACTIVITIES_TABLE: &str = "activities";
pub const CAMPERS_TABLE: &str = "campers";
pub const SIGNUPS_TABLE: &str = "signups";

pub const CAMPER_MIN_AGE: i64 = 8;
pub const CAMPER_MAX_AGE: i64 = 18;
pub const SIGNUP_MIN_TIME: i64 = 0;
pub const SIGNUP_MAX_TIME: i64 = 23;

fn activities_schema() -> String {
    format!(
        "
    CREATE TABLE IF NOT EXISTS {t} (
        id INTEGER NOT NULL,
        name TEXT NOT NULL,
        difficulty INTEGER NOT NULL,
        CONSTRAINT {pk} PRIMARY KEY (id)
    )
",
        t = ACTIVITIES_TABLE,
        pk = naming::pk(ACTIVITIES_TABLE),
    )
}

fn campers_schema() -> String {
    format!(
        "
    CREATE TABLE IF NOT EXISTS {t} (
        id INTEGER NOT NULL,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        CONSTRAINT {pk} PRIMARY KEY (id),
        CONSTRAINT {ck_name} CHECK (length(name) > 0),
        CONSTRAINT {ck_age} CHECK (age BETWEEN {min} AND {max})
    )
",
        t = CAMPERS_TABLE,
        pk = naming::pk(CAMPERS_TABLE),
        ck_name = naming::ck(CAMPERS_TABLE, "name_present"),
        ck_age = naming::ck(CAMPERS_TABLE, "age_range"),
        min = CAMPER_MIN_AGE,
        max = CAMPER_MAX_AGE,
    )
}

// camper_id is nullable: deleting a camper clears it instead of removing the
// signup. activity_id is not: deleting an activity removes its signups.
fn signups_schema() -> String {
    format!(
        "
    CREATE TABLE IF NOT EXISTS {t} (
        id INTEGER NOT NULL,
        time INTEGER NOT NULL,
        camper_id INTEGER,
        activity_id INTEGER NOT NULL,
        CONSTRAINT {pk} PRIMARY KEY (id),
        CONSTRAINT {ck_time} CHECK (time BETWEEN {min} AND {max}),
        CONSTRAINT {fk_camper} FOREIGN KEY(camper_id) REFERENCES {campers}(id) ON DELETE SET NULL,
        CONSTRAINT {fk_activity} FOREIGN KEY(activity_id) REFERENCES {activities}(id) ON DELETE CASCADE
    )
",
        t = SIGNUPS_TABLE,
        pk = naming::pk(SIGNUPS_TABLE),
        ck_time = naming::ck(SIGNUPS_TABLE, "time_range"),
        min = SIGNUP_MIN_TIME,
        max = SIGNUP_MAX_TIME,
        fk_camper = naming::fk(SIGNUPS_TABLE, "camper_id", CAMPERS_TABLE),
        campers = CAMPERS_TABLE,
        fk_activity = naming::fk(SIGNUPS_TABLE, "activity_id", ACTIVITIES_TABLE),
        activities = ACTIVITIES_TABLE,
    )
}

fn signup_index(column: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {ix} ON {t}({column})",
        ix = naming::ix(SIGNUPS_TABLE, column),
        t = SIGNUPS_TABLE,
    )
}

/// All DDL statements, in dependency order.
pub fn camp_db_schema() -> Vec<String> {
    vec![
        activities_schema(),
        campers_schema(),
        signups_schema(),
        signup_index("camper_id"),
        signup_index("activity_id"),
    ]
}
