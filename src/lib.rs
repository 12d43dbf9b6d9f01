//! Campsite: the persistence layer for a camp-signup application.
//!
//! Three records live in one SQLite file:
//!
//! - **Activity**: name and difficulty. Deleting one deletes its signups.
//! - **Camper**: name (non-empty) and age (8 to 18). Deleting one keeps
//!   their signups, with the camper reference cleared.
//! - **Signup**: a camper at an activity at an hour of the day (0 to 23).
//!
//! Validation happens on assignment: constructors and setters reject bad
//! values before anything is written. Each record serializes to nested JSON
//! without walking back along the relation it was reached through.
//!
//! # Crate Structure
//!
//! - [`core`]: store, config, broker, schema and constraint naming
//! - [`models`]: the records, their operations and serialization
//!
//! # Examples
//!
//! ```bash
//! campsite init
//! campsite activity add --name Archery --difficulty 2
//! campsite camper add --name Ada --age 12
//! campsite signup add --camper-id 1 --activity-id 1 --time 9
//! campsite activity show --id 1 --rule=-signups.camper
//! ```

mod cli;
pub mod core;
pub mod models;

use crate::cli::{ActivityCommand, CamperCommand, Cli, Command, ShowArgs, SignupCommand};
use crate::core::{config, db, envelope, error::CampError, store::Store};
use crate::models::{activity, camper, serialize, signup};
use clap::Parser;
use serde_json::{Value as JsonValue, json};
use std::path::PathBuf;

pub const ROOT_ENV_VAR: &str = "CAMPSITE_ROOT";
const DEFAULT_ROOT_DIR: &str = ".campsite";

fn resolve_root(flag: Option<PathBuf>) -> Result<PathBuf, CampError> {
    if let Some(root) = flag {
        return Ok(root);
    }
    if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
        if !root.trim().is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
    Ok(std::env::current_dir()?.join(DEFAULT_ROOT_DIR))
}

fn emit(cmd: &str, data: JsonValue) -> Result<(), CampError> {
    let out = serde_json::to_string_pretty(&envelope::ok(cmd, data))
        .map_err(|e| CampError::IoError(e.into()))?;
    println!("{}", out);
    Ok(())
}

fn shape(value: JsonValue, args: &ShowArgs) -> Result<JsonValue, CampError> {
    let rules: Vec<&str> = args.rules.iter().map(String::as_str).collect();
    let value = serialize::apply_rules(value, &rules)?;
    if args.only.is_empty() {
        return Ok(value);
    }
    let only: Vec<&str> = args.only.iter().map(String::as_str).collect();
    Ok(serialize::select_only(value, &only))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<JsonValue, CampError> {
    serialize::to_value(value)
}

pub fn run() -> Result<(), CampError> {
    let cli = Cli::parse();
    let root = resolve_root(cli.root)?;

    if let Command::Init = cli.command {
        let wrote_config = config::write_default_config(&root, &config::CampConfig::default())?;
        let store = Store::open(&root)?;
        db::initialize_camp_db(&store)?;
        return emit(
            "init",
            json!({
                "root": root.display().to_string(),
                "database": store.db_path().display().to_string(),
                "config_written": wrote_config,
            }),
        );
    }

    let store = Store::open(&root)?;
    db::initialize_camp_db(&store)?;

    match cli.command {
        Command::Init => Ok(()),
        Command::Activity(group) => run_activity(&store, group.command),
        Command::Camper(group) => run_camper(&store, group.command),
        Command::Signup(group) => run_signup(&store, group.command),
    }
}

fn run_activity(store: &Store, command: ActivityCommand) -> Result<(), CampError> {
    match command {
        ActivityCommand::Add { name, difficulty } => {
            let created = activity::create_activity(
                store,
                activity::NewActivity {
                    name: &name,
                    difficulty,
                },
            )?;
            emit("activity.add", to_json(&created)?)
        }
        ActivityCommand::List => emit("activity.list", to_json(&activity::list_activities(store)?)?),
        ActivityCommand::Show(args) => {
            let value = activity::serialize_activity(store, args.id)?;
            emit("activity.show", shape(value, &args)?)
        }
        ActivityCommand::Update {
            id,
            name,
            difficulty,
        } => {
            let mut current = activity::get_activity(store, id)?;
            if let Some(name) = name {
                current.set_name(&name);
            }
            if let Some(difficulty) = difficulty {
                current.set_difficulty(difficulty);
            }
            activity::update_activity(store, &current)?;
            emit("activity.update", to_json(&current)?)
        }
        ActivityCommand::Delete { id } => {
            let removed = activity::delete_activity(store, id)?;
            emit(
                "activity.delete",
                json!({ "id": id, "signups_removed": removed }),
            )
        }
        ActivityCommand::Campers { id } => {
            emit("activity.campers", to_json(&activity::activity_campers(store, id)?)?)
        }
    }
}

fn run_camper(store: &Store, command: CamperCommand) -> Result<(), CampError> {
    match command {
        CamperCommand::Add { name, age } => {
            let created = camper::create_camper(store, camper::NewCamper::new(&name, age)?)?;
            emit("camper.add", to_json(&created)?)
        }
        CamperCommand::List => emit("camper.list", to_json(&camper::list_campers(store)?)?),
        CamperCommand::Show(args) => {
            let value = camper::serialize_camper(store, args.id)?;
            emit("camper.show", shape(value, &args)?)
        }
        CamperCommand::Update { id, name, age } => {
            let mut current = camper::get_camper(store, id)?;
            if let Some(name) = name {
                current.set_name(&name)?;
            }
            if let Some(age) = age {
                current.set_age(age)?;
            }
            camper::update_camper(store, &current)?;
            emit("camper.update", to_json(&current)?)
        }
        CamperCommand::Delete { id } => {
            camper::delete_camper(store, id)?;
            emit("camper.delete", json!({ "id": id }))
        }
        CamperCommand::Activities { id } => {
            emit("camper.activities", to_json(&camper::camper_activities(store, id)?)?)
        }
    }
}

fn run_signup(store: &Store, command: SignupCommand) -> Result<(), CampError> {
    match command {
        SignupCommand::Add {
            camper_id,
            activity_id,
            time,
        } => {
            let new = signup::NewSignup::new(time, camper_id, activity_id)?;
            emit("signup.add", to_json(&signup::create_signup(store, new)?)?)
        }
        SignupCommand::List => emit("signup.list", to_json(&signup::list_signups(store)?)?),
        SignupCommand::Show(args) => {
            let value = signup::serialize_signup(store, args.id)?;
            emit("signup.show", shape(value, &args)?)
        }
        SignupCommand::Update { id, time } => {
            let mut current = signup::get_signup(store, id)?;
            current.set_time(time)?;
            signup::update_signup(store, &current)?;
            emit("signup.update", to_json(&current)?)
        }
        SignupCommand::Delete { id } => {
            signup::delete_signup(store, id)?;
            emit("signup.delete", json!({ "id": id }))
        }
    }
}
