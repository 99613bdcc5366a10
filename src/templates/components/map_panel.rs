use crate::map::{MapSdk, MapView, SceneMap};
use crate::view::DirectoryView;
use maud::{html, Markup};

pub fn map_panel(view: &DirectoryView<SceneMap>) -> Markup {
    match view.map() {
        MapView::Unavailable(reason) => html! {
            div class="map-fallback" role="status" {
                strong { "Map unavailable." }
                " Showing results as a list only "
                small { "(" (reason) ")" }
            }
        },
        MapView::Ready(manager) => {
            let scene = manager.sdk();
            let center = scene.center();

            html! {
                div class="map-panel"
                    role="region"
                    aria-label="Map of results"
                    style=(format!("width: {}px; height: {}px;", scene.width(), scene.height()))
                    data-zoom=(scene.zoom().to_string())
                    data-center=(format!("{:.5},{:.5}", center.lat, center.lng))
                {
                    @for listing in view.listings() {
                        @if let Some(marker) = manager.marker_for(listing.id).and_then(|h| scene.marker(h)) {
                            @if let Some((x, y)) = scene.viewport_position(marker.position) {
                                a.map-marker.is-emphasized[marker.emphasized]
                                    href=(view.select_href(listing.id))
                                    title=(marker.title)
                                    data-listing=(listing.id)
                                    style=(format!("left: {x:.2}%; top: {y:.2}%;"))
                                {}
                            }
                        }
                    }
                    @if let Some((window, marker)) = scene.open_info_window() {
                        @if let Some((x, y)) = scene.viewport_position(marker.position) {
                            div class="map-popup" style=(format!("left: {x:.2}%; top: {y:.2}%;")) {
                                a href=(window.content.href) { strong { (window.content.title) } }
                                @if let Some(detail) = &window.content.detail {
                                    br;
                                    span { (detail) }
                                }
                                " "
                                a href=(view.url()) class="close-popup" aria-label="Close" { "×" }
                            }
                        }
                    }
                }
            }
        }
    }
}
