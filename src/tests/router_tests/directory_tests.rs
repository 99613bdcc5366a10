use crate::config::AppConfig;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, tag_with, test_app, test_app_with, FakeApi};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn lists_every_listing_without_filters() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/businesses"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    for name in ["Hotel Volcán", "Soda La Esquina", "Canopy Tours", "Casa sin mapa"] {
        assert!(body.contains(name), "{name} missing");
    }
    assert!(body.contains("4</strong> places found"));
    assert!(body.contains("No map location"));
}

#[test]
fn non_canonical_filters_redirect_to_canonical_url() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/businesses?priceLevel=3&priceLevel=9&priceLevel=1"), &app).unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["Location"], "/businesses?priceLevel=1&priceLevel=3");
}

#[test]
fn canonical_redirect_keeps_the_selection() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(
        get("/businesses?priceLevel=3&priceLevel=1&selected=1"),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers()["Location"],
        "/businesses?priceLevel=1&priceLevel=3&selected=1"
    );
}

#[test]
fn price_toggle_links_remove_the_active_level() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let resp = handle(get("/businesses?priceLevel=1&priceLevel=3"), &app).unwrap();
    let body = body_string(resp);

    assert!(body.contains("Hotel Volcán"));
    assert!(body.contains("Soda La Esquina"));
    assert!(!body.contains("Canopy Tours"));

    let one = tag_with(&body, "href=\"/businesses?priceLevel=3\"");
    assert!(one.contains("is-active"));
    assert!(one.contains("aria-pressed=\"true\""));
}

#[test]
fn selected_listing_is_highlighted_in_list_and_map() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let body = body_string(handle(get("/businesses?selected=7"), &app).unwrap());

    assert!(tag_with(&body, "id=\"listing-7\"").contains("is-selected"));
    assert!(!tag_with(&body, "id=\"listing-1\"").contains("is-selected"));
    assert!(tag_with(&body, "data-listing=\"7\"").contains("is-emphasized"));
    assert!(body.contains("data-zoom=\"15\""));
    assert!(body.contains("data-center=\"10.30000,-84.82500\""));
    assert!(body.contains("class=\"map-popup\""));
}

#[test]
fn selection_outside_the_results_is_ignored() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let body = body_string(handle(get("/businesses?priceLevel=1&selected=7"), &app).unwrap());

    assert!(!tag_with(&body, "id=\"listing-1\"").contains("is-selected"));
    assert!(!body.contains("class=\"map-popup\""));
}

#[test]
fn disabled_map_falls_back_to_the_list() {
    let mut config = AppConfig::default();
    config.map.enabled = false;
    let app = test_app_with(config, Arc::new(FakeApi::seeded()));

    let body = body_string(handle(get("/businesses?selected=1"), &app).unwrap());

    assert!(body.contains("Map unavailable."));
    assert!(!body.contains("class=\"map-panel\""));
    assert!(body.contains("Canopy Tours"));
    assert!(tag_with(&body, "id=\"listing-1\"").contains("is-selected"));
}

#[test]
fn failed_fetch_shows_inline_error_with_retry() {
    let api = Arc::new(FakeApi::seeded());
    api.fail_listings.store(true, Ordering::SeqCst);
    let app = test_app(api.clone());

    let resp = handle(get("/businesses?rating=5"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Could not load listings"));
    assert!(tag_with(&body, "class=\"retry\"").contains("href=\"/businesses?rating=5\""));

    api.fail_listings.store(false, Ordering::SeqCst);
    let body = body_string(handle(get("/businesses?rating=5"), &app).unwrap());
    assert!(body.contains("Canopy Tours"));
    assert_eq!(api.list_calls(), 2);
}

#[test]
fn identical_filters_hit_the_cache() {
    let api = Arc::new(FakeApi::seeded());
    let app = test_app(api.clone());

    handle(get("/businesses?amenities=wifi"), &app).unwrap();
    handle(get("/businesses?amenities=wifi&selected=1"), &app).unwrap();
    assert_eq!(api.list_calls(), 1);

    handle(get("/businesses?amenities=pool"), &app).unwrap();
    assert_eq!(api.list_calls(), 2);
}

#[test]
fn business_detail_page() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let body = body_string(handle(get("/businesses/1"), &app).unwrap());

    assert!(body.contains("Hotel Volcán"));
    assert!(body.contains("Accommodation"));
    assert!(body.contains("href=\"/businesses/1/claim\""));
}

#[test]
fn claimed_business_has_no_claim_link() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    let body = body_string(handle(get("/businesses/7"), &app).unwrap());

    assert!(body.contains("Verified owner"));
    assert!(!body.contains("Claim this listing"));
}

#[test]
fn missing_or_malformed_business_id_is_not_found() {
    let app = test_app(Arc::new(FakeApi::seeded()));
    assert!(matches!(handle(get("/businesses/42"), &app), Err(ServerError::NotFound)));
    assert!(matches!(handle(get("/businesses/abc"), &app), Err(ServerError::NotFound)));
    assert!(matches!(handle(get("/businesses/0"), &app), Err(ServerError::NotFound)));
}
