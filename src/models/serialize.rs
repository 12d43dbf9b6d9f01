//! Flattening records into nested JSON.
//!
//! Records hold ids, not each other, so every shape here is built by the
//! caller with exactly the relations it wants. The back edge of whatever
//! relation a node was reached through is never loaded:
//!
//! - activity: signups, each with its camper (`-signups.activity`)
//! - camper: signups, each with its activity (`-signups.camper`)
//! - signup: its camper and activity, neither with signups
//!
//! `apply_rules` and `select_only` trim the resulting value further.

use crate::core::error::CampError;
use crate::models::activity::Activity;
use crate::models::camper::Camper;
use crate::models::signup::Signup;
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize)]
pub struct SignupNode {
    #[serde(flatten)]
    pub signup: Signup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camper: Option<Camper>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
}

impl SignupNode {
    pub fn with_camper(signup: Signup, camper: Option<Camper>) -> Self {
        Self {
            signup,
            camper,
            activity: None,
        }
    }

    pub fn with_activity(signup: Signup, activity: Activity) -> Self {
        Self {
            signup,
            camper: None,
            activity: Some(activity),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityTree {
    #[serde(flatten)]
    pub activity: Activity,
    pub signups: Vec<SignupNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CamperTree {
    #[serde(flatten)]
    pub camper: Camper,
    pub signups: Vec<SignupNode>,
}

pub fn to_value<T: Serialize>(node: &T) -> Result<JsonValue, CampError> {
    serde_json::to_value(node).map_err(|e| CampError::IoError(e.into()))
}

/// Remove every path named by a `-a.b.c` rule. Arrays on the way are
/// descended element by element; missing keys are ignored.
pub fn apply_rules(mut value: JsonValue, rules: &[&str]) -> Result<JsonValue, CampError> {
    for rule in rules {
        let path = rule.strip_prefix('-').ok_or_else(|| {
            CampError::ValidationError(format!(
                "serialize rule '{}' must start with '-'",
                rule
            ))
        })?;
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CampError::ValidationError(format!(
                "serialize rule '{}' has an empty path segment",
                rule
            )));
        }
        remove_path(&mut value, &segments);
    }
    Ok(value)
}

fn remove_path(value: &mut JsonValue, segments: &[&str]) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                remove_path(item, segments);
            }
        }
        JsonValue::Object(map) => match segments {
            [] => {}
            [last] => {
                map.remove(*last);
            }
            [head, rest @ ..] => {
                if let Some(child) = map.get_mut(*head) {
                    remove_path(child, rest);
                }
            }
        },
        _ => {}
    }
}

/// Keep only the listed top-level keys of an object (or of each object in
/// an array).
pub fn select_only(value: JsonValue, keys: &[&str]) -> JsonValue {
    match value {
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(|v| select_only(v, keys)).collect())
        }
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(k, _)| keys.contains(&k.as_str()))
                .collect(),
        ),
        other => other,
    }
}
