use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, test_app, FakeApi};
use std::sync::Arc;

#[test]
fn claim_form_renders_for_unclaimed_listing() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/businesses/3/claim"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Claim Soda La Esquina"));
    assert!(body.contains("action=\"/businesses/3/claim\""));
}

#[test]
fn claimed_listing_cannot_be_claimed_again() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    assert!(matches!(
        handle(get("/businesses/7/claim"), &app),
        Err(ServerError::BadRequest(_))
    ));
    assert!(matches!(
        handle(post_form("/businesses/7/claim", "fullName=Ana"), &app),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn invalid_claim_is_rerendered_with_errors() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());

    let resp = handle(
        post_form("/businesses/3/claim", "fullName=Ana+Mora&email=bad&role=owner"),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Enter a valid email address."));
    assert!(body.contains("value=\"Ana Mora\""));
    assert!(api.claims.lock().unwrap().is_empty());
}

#[test]
fn valid_claim_is_submitted_and_listings_refetched() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());
    handle(get("/businesses"), &app).unwrap();

    let resp = handle(
        post_form(
            "/businesses/3/claim",
            "fullName=Ana+Mora&email=ana%40example.com&role=manager&message=Hi",
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Claim submitted"));
    assert!(body.contains("Reference #1"));

    let claims = api.claims.lock().unwrap().clone();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].business_id, 3);
    assert_eq!(claims[0].message.as_deref(), Some("Hi"));

    handle(get("/businesses"), &app).unwrap();
    assert_eq!(api.list_calls(), 2);
}
