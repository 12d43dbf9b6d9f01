use campsite::core::db;
use campsite::core::error::CampError;
use campsite::core::store::Store;
use campsite::models::activity::{NewActivity, create_activity};
use campsite::models::camper::{NewCamper, create_camper};
use campsite::models::signup::{
    NewSignup, create_signup, delete_signup, get_signup, list_signups, update_signup,
};
use tempfile::tempdir;

fn open_store(root: &std::path::Path) -> Store {
    let store = Store::open(root).unwrap();
    db::initialize_camp_db(&store).unwrap();
    store
}

fn seed(store: &Store) -> (i64, i64) {
    let ada = create_camper(store, NewCamper::new("Ada", 12).unwrap()).unwrap();
    let archery = create_activity(
        store,
        NewActivity {
            name: "Archery",
            difficulty: 2,
        },
    )
    .unwrap();
    (ada.id(), archery.id())
}

#[test]
fn test_signup_time_outside_range_rejected() {
    for time in [-1, 24, 99] {
        let err = NewSignup::new(time, 1, 1).unwrap_err();
        assert!(matches!(err, CampError::ValidationError(_)), "time {time}");
    }
}

#[test]
fn test_signup_create_update_delete() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let (camper_id, activity_id) = seed(&store);

    let mut s = create_signup(&store, NewSignup::new(0, camper_id, activity_id).unwrap()).unwrap();
    assert_eq!(s.camper_id(), Some(camper_id));
    assert_eq!(s.activity_id(), activity_id);

    assert!(s.set_time(24).is_err());
    s.set_time(23).unwrap();
    update_signup(&store, &s).unwrap();
    assert_eq!(get_signup(&store, s.id()).unwrap().time(), 23);

    delete_signup(&store, s.id()).unwrap();
    assert!(matches!(get_signup(&store, s.id()), Err(CampError::NotFound(_))));
    assert!(matches!(delete_signup(&store, s.id()), Err(CampError::NotFound(_))));
}

#[test]
fn test_signup_requires_existing_camper_and_activity() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let (camper_id, activity_id) = seed(&store);

    let err = create_signup(&store, NewSignup::new(9, camper_id + 100, activity_id).unwrap())
        .unwrap_err();
    assert!(format!("{}", err).contains("camper"));
    assert!(matches!(err, CampError::NotFound(_)));

    let err = create_signup(&store, NewSignup::new(9, camper_id, activity_id + 100).unwrap())
        .unwrap_err();
    assert!(format!("{}", err).contains("activity"));

    assert!(list_signups(&store).unwrap().is_empty());
}

#[test]
fn test_storage_check_constraint_backs_up_validation() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());
    let (camper_id, activity_id) = seed(&store);

    let conn = db::db_connect(&store.db_path(), 5).unwrap();
    let res = conn.execute(
        "INSERT INTO signups(time, camper_id, activity_id) VALUES(30, ?1, ?2)",
        [camper_id, activity_id],
    );
    let msg = res.unwrap_err().to_string();
    assert!(msg.contains("ck_signups_time_range"), "{msg}");
}
