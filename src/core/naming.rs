//! Constraint naming convention.
//!
//! Every index and constraint in the schema gets a deterministic name built
//! from its table and columns, so migrations and error messages can refer to
//! them by name:
//!
//! | kind | template                                 |
//! |------|------------------------------------------|
//! | ix   | `ix_<table>_<column>`                    |
//! | uq   | `uq_<table>_<column>`                    |
//! | ck   | `ck_<table>_<constraint>`                |
//! | fk   | `fk_<table>_<column>_<referred_table>`   |
//! | pk   | `pk_<table>`                             |

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint<'a> {
    Index {
        table: &'a str,
        column: &'a str,
    },
    Unique {
        table: &'a str,
        column: &'a str,
    },
    Check {
        table: &'a str,
        name: &'a str,
    },
    ForeignKey {
        table: &'a str,
        column: &'a str,
        referred_table: &'a str,
    },
    PrimaryKey {
        table: &'a str,
    },
}

impl Constraint<'_> {
    pub fn name(&self) -> String {
        match self {
            Constraint::Index { table, column } => format!("ix_{}_{}", table, column),
            Constraint::Unique { table, column } => format!("uq_{}_{}", table, column),
            Constraint::Check { table, name } => format!("ck_{}_{}", table, name),
            Constraint::ForeignKey {
                table,
                column,
                referred_table,
            } => format!("fk_{}_{}_{}", table, column, referred_table),
            Constraint::PrimaryKey { table } => format!("pk_{}", table),
        }
    }
}

pub fn pk(table: &str) -> String {
    Constraint::PrimaryKey { table }.name()
}

pub fn fk(table: &str, column: &str, referred_table: &str) -> String {
    Constraint::ForeignKey {
        table,
        column,
        referred_table,
    }
    .name()
}

pub fn ck(table: &str, name: &str) -> String {
    Constraint::Check { table, name }.name()
}

pub fn ix(table: &str, column: &str) -> String {
    Constraint::Index { table, column }.name()
}
