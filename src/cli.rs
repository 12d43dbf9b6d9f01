//! CLI struct definitions for the campsite command-line interface.
//!
//! All clap-derived types live here. Dispatch lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "campsite",
    version = env!("CARGO_PKG_VERSION"),
    about = "Activities, campers and signups for a summer camp, kept in SQLite."
)]
pub(crate) struct Cli {
    /// Store directory (defaults to $CAMPSITE_ROOT, then ./.campsite).
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create the store directory, default config and tables
    Init,
    /// Manage activities
    Activity(ActivityCli),
    /// Manage campers
    Camper(CamperCli),
    /// Manage signups
    Signup(SignupCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct ShowArgs {
    #[clap(long)]
    pub id: i64,
    /// Comma-separated top-level keys to keep.
    #[clap(long, value_delimiter = ',')]
    pub only: Vec<String>,
    /// Path to drop from the output, e.g. `-signups.camper`. Repeatable.
    #[clap(long = "rule", allow_hyphen_values = true)]
    pub rules: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ActivityCli {
    #[clap(subcommand)]
    pub command: ActivityCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ActivityCommand {
    /// Add an activity
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        difficulty: i64,
    },
    /// List all activities
    List,
    /// Show an activity with its signups and their campers
    Show(ShowArgs),
    /// Change an activity's name or difficulty
    Update {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        difficulty: Option<i64>,
    },
    /// Delete an activity and all of its signups
    Delete {
        #[clap(long)]
        id: i64,
    },
    /// List campers signed up for an activity
    Campers {
        #[clap(long)]
        id: i64,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct CamperCli {
    #[clap(subcommand)]
    pub command: CamperCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CamperCommand {
    /// Add a camper (age 8-18)
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        age: i64,
    },
    /// List all campers
    List,
    /// Show a camper with their signups and activities
    Show(ShowArgs),
    /// Change a camper's name or age
    Update {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        age: Option<i64>,
    },
    /// Delete a camper; their signups are kept
    Delete {
        #[clap(long)]
        id: i64,
    },
    /// List activities a camper is signed up for
    Activities {
        #[clap(long)]
        id: i64,
    },
}

#[derive(clap::Args, Debug)]
pub(crate) struct SignupCli {
    #[clap(subcommand)]
    pub command: SignupCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum SignupCommand {
    /// Sign a camper up for an activity at an hour (0-23)
    Add {
        #[clap(long)]
        camper_id: i64,
        #[clap(long)]
        activity_id: i64,
        #[clap(long)]
        time: i64,
    },
    /// List all signups
    List,
    /// Show a signup with its camper and activity
    Show(ShowArgs),
    /// Move a signup to another hour
    Update {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        time: i64,
    },
    /// Delete a signup
    Delete {
        #[clap(long)]
        id: i64,
    },
}
