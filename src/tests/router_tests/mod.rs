mod claim_tests;
mod directory_tests;
mod itinerary_tests;

use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{body_string, get, test_app, FakeApi};
use std::sync::Arc;

#[test]
fn root_redirects_to_the_directory() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/"), &app).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["Location"], "/businesses");
}

#[test]
fn health_check() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/health"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "ok");
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let result = handle(get("/nowhere"), &app);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn errors_render_as_html_pages() {
    let resp = html_error_response(ServerError::BadRequest("Nope.".into()));
    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.contains("Error 400"));
    assert!(body.contains("Nope."));
}
