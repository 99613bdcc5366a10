use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, date, get, post_form, test_app, FakeApi};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn lists_itineraries() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let body = body_string(handle(get("/itineraries"), &app).unwrap());

    assert!(body.contains("Long weekend"));
    assert!(body.contains("(3 days)"));
    assert!(body.contains("action=\"/itineraries/1/delete\""));
}

#[test]
fn empty_itinerary_list() {
    let api = Arc::new(FakeApi::seeded());
    api.itineraries.lock().unwrap().clear();
    let app = test_app(api);

    let body = body_string(handle(get("/itineraries"), &app).unwrap());
    assert!(body.contains("No trips planned yet."));
}

#[test]
fn failed_itinerary_load_keeps_the_form() {
    let api = Arc::new(FakeApi::seeded());
    api.fail_itineraries.store(true, Ordering::SeqCst);
    let app = test_app(api);

    let resp = handle(get("/itineraries"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Could not load your trips"));
    assert!(body.contains("Plan a new trip"));
}

#[test]
fn invalid_itinerary_is_rejected() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());

    let resp = handle(
        post_form("/itineraries", "name=&startDate=2026-12-10&endDate=2026-12-01"),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Give the trip a name."));
    assert!(body.contains("End date must not be before the start date."));
    assert_eq!(api.itineraries.lock().unwrap().len(), 1);
}

#[test]
fn valid_itinerary_is_created() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());

    let resp = handle(
        post_form(
            "/itineraries",
            "name=Caribe&startDate=2026-12-01&endDate=2026-12-05&businessId=3",
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["Location"], "/itineraries");

    let all = api.itineraries.lock().unwrap().clone();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].name, "Caribe");
    assert_eq!(all[1].start_date, date("2026-12-01"));
    assert_eq!(all[1].business_ids, vec![3]);
}

#[test]
fn delete_itinerary() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());

    let resp = handle(post_form("/itineraries/1/delete", ""), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(api.itineraries.lock().unwrap().is_empty());

    assert!(matches!(
        handle(post_form("/itineraries/1/delete", ""), &app),
        Err(ServerError::NotFound)
    ));
}
