use campsite::core::db;
use campsite::core::error::CampError;
use campsite::core::store::Store;
use campsite::models::activity::{
    NewActivity, activity_campers, activity_signups, create_activity, delete_activity,
    get_activity, list_activities, update_activity,
};
use campsite::models::camper::{NewCamper, create_camper, delete_camper, get_camper};
use campsite::models::signup::{NewSignup, create_signup, get_signup, list_signups};
use tempfile::tempdir;

fn open_store(root: &std::path::Path) -> Store {
    let store = Store::open(root).unwrap();
    db::initialize_camp_db(&store).unwrap();
    store
}

#[test]
fn test_activity_crud() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    let mut hike = create_activity(
        &store,
        NewActivity {
            name: "Hiking",
            difficulty: 3,
        },
    )
    .unwrap();
    assert_eq!(get_activity(&store, hike.id()).unwrap(), hike);

    hike.set_difficulty(5);
    update_activity(&store, &hike).unwrap();
    assert_eq!(get_activity(&store, hike.id()).unwrap().difficulty(), 5);

    assert_eq!(list_activities(&store).unwrap().len(), 1);
    assert_eq!(delete_activity(&store, hike.id()).unwrap(), 0);
    assert!(list_activities(&store).unwrap().is_empty());
}

#[test]
fn test_deleting_activity_cascades_to_its_signups_only() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    let ada = create_camper(&store, NewCamper::new("Ada", 12).unwrap()).unwrap();
    let grace = create_camper(&store, NewCamper::new("Grace", 15).unwrap()).unwrap();
    let archery = create_activity(
        &store,
        NewActivity {
            name: "Archery",
            difficulty: 2,
        },
    )
    .unwrap();
    let swim = create_activity(
        &store,
        NewActivity {
            name: "Swimming",
            difficulty: 1,
        },
    )
    .unwrap();

    let a1 = create_signup(&store, NewSignup::new(9, ada.id(), archery.id()).unwrap()).unwrap();
    let a2 = create_signup(&store, NewSignup::new(10, grace.id(), archery.id()).unwrap()).unwrap();
    let s1 = create_signup(&store, NewSignup::new(11, ada.id(), swim.id()).unwrap()).unwrap();

    assert_eq!(delete_activity(&store, archery.id()).unwrap(), 2);

    assert!(matches!(get_signup(&store, a1.id()), Err(CampError::NotFound(_))));
    assert!(matches!(get_signup(&store, a2.id()), Err(CampError::NotFound(_))));
    assert!(get_signup(&store, s1.id()).is_ok());
    assert_eq!(list_signups(&store).unwrap().len(), 1);

    // Campers are untouched by an activity delete.
    assert!(get_camper(&store, ada.id()).is_ok());
    assert!(get_camper(&store, grace.id()).is_ok());
}

#[test]
fn test_activity_campers_association() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    let ada = create_camper(&store, NewCamper::new("Ada", 12).unwrap()).unwrap();
    let grace = create_camper(&store, NewCamper::new("Grace", 15).unwrap()).unwrap();
    let archery = create_activity(
        &store,
        NewActivity {
            name: "Archery",
            difficulty: 2,
        },
    )
    .unwrap();
    create_signup(&store, NewSignup::new(9, ada.id(), archery.id()).unwrap()).unwrap();
    create_signup(&store, NewSignup::new(10, grace.id(), archery.id()).unwrap()).unwrap();

    let campers = activity_campers(&store, archery.id()).unwrap();
    let names: Vec<&str> = campers.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
    assert_eq!(activity_signups(&store, archery.id()).unwrap().len(), 2);

    // Ada's signup outlives the camper row but no longer yields a camper.
    delete_camper(&store, ada.id()).unwrap();
    let campers = activity_campers(&store, archery.id()).unwrap();
    let names: Vec<&str> = campers.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Grace"]);
    assert_eq!(activity_signups(&store, archery.id()).unwrap().len(), 2);
}

#[test]
fn test_missing_activity_is_not_found() {
    let tmp = tempdir().unwrap();
    let store = open_store(tmp.path());

    assert!(matches!(get_activity(&store, 7), Err(CampError::NotFound(_))));
    assert!(matches!(delete_activity(&store, 7), Err(CampError::NotFound(_))));
    assert!(matches!(activity_campers(&store, 7), Err(CampError::NotFound(_))));
}
