use campsite::core::db;
use campsite::core::store::Store;
use campsite::models::activity::{NewActivity, create_activity, serialize_activity};
use campsite::models::camper::{NewCamper, create_camper, delete_camper, serialize_camper};
use campsite::models::serialize::{apply_rules, select_only};
use campsite::models::signup::{NewSignup, create_signup, serialize_signup};
use serde_json::json;
use tempfile::tempdir;

struct Seeded {
    store: Store,
    camper_id: i64,
    activity_id: i64,
    signup_id: i64,
}

fn seeded(root: &std::path::Path) -> Seeded {
    let store = Store::open(root).unwrap();
    db::initialize_camp_db(&store).unwrap();
    let ada = create_camper(&store, NewCamper::new("Ada", 12).unwrap()).unwrap();
    let archery = create_activity(
        &store,
        NewActivity {
            name: "Archery",
            difficulty: 2,
        },
    )
    .unwrap();
    let s = create_signup(&store, NewSignup::new(9, ada.id(), archery.id()).unwrap()).unwrap();
    Seeded {
        store,
        camper_id: ada.id(),
        activity_id: archery.id(),
        signup_id: s.id(),
    }
}

#[test]
fn test_signup_serializes_both_sides_without_back_edges() {
    let tmp = tempdir().unwrap();
    let s = seeded(tmp.path());

    let v = serialize_signup(&s.store, s.signup_id).unwrap();
    assert_eq!(
        v,
        json!({
            "id": s.signup_id,
            "time": 9,
            "camper_id": s.camper_id,
            "activity_id": s.activity_id,
            "camper": {"id": s.camper_id, "name": "Ada", "age": 12},
            "activity": {"id": s.activity_id, "name": "Archery", "difficulty": 2}
        })
    );
    assert!(v["camper"].get("signups").is_none());
    assert!(v["activity"].get("signups").is_none());
}

#[test]
fn test_activity_serializes_signups_with_campers_only() {
    let tmp = tempdir().unwrap();
    let s = seeded(tmp.path());

    let v = serialize_activity(&s.store, s.activity_id).unwrap();
    assert_eq!(v["name"], "Archery");
    let signups = v["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 1);
    assert_eq!(signups[0]["camper"]["name"], "Ada");
    assert!(signups[0].get("activity").is_none());
}

#[test]
fn test_camper_serializes_signups_with_activities_only() {
    let tmp = tempdir().unwrap();
    let s = seeded(tmp.path());

    let v = serialize_camper(&s.store, s.camper_id).unwrap();
    assert_eq!(v["age"], 12);
    let signups = v["signups"].as_array().unwrap();
    assert_eq!(signups[0]["activity"]["difficulty"], 2);
    assert!(signups[0].get("camper").is_none());
}

#[test]
fn test_orphaned_signup_serializes_null_camper() {
    let tmp = tempdir().unwrap();
    let s = seeded(tmp.path());
    delete_camper(&s.store, s.camper_id).unwrap();

    let v = serialize_signup(&s.store, s.signup_id).unwrap();
    assert!(v["camper_id"].is_null());
    assert!(v.get("camper").is_none());

    let a = serialize_activity(&s.store, s.activity_id).unwrap();
    assert!(a["signups"][0].get("camper").is_none());
}

#[test]
fn test_rules_and_only_shape_output() {
    let tmp = tempdir().unwrap();
    let s = seeded(tmp.path());

    let v = serialize_activity(&s.store, s.activity_id).unwrap();
    let v = apply_rules(v, &["-signups.camper", "-difficulty"]).unwrap();
    assert!(v.get("difficulty").is_none());
    assert!(v["signups"][0].get("camper").is_none());

    let v = select_only(v, &["id", "name"]);
    assert_eq!(v, json!({"id": s.activity_id, "name": "Archery"}));
}
