use crate::domain::Category;
use crate::map::SceneMap;
use crate::query::QueryState;
use crate::templates::components::{filter_bar, inline_error, listing_card, map_panel};
use crate::templates::desktop_layout;
use crate::view::DirectoryView;
use maud::{html, Markup};

pub fn directory_page(view: &DirectoryView<SceneMap>, categories: &[Category]) -> Markup {
    let category_name = |id: i64| {
        categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    };
    let selection = view.selection();

    desktop_layout(
        "Explore",
        html! {
            main class="directory" {
                div {
                    (filter_bar(view, categories))

                    section class="results" aria-live="polite" {
                        @match view.results() {
                            QueryState::Idle | QueryState::Pending => {
                                p class="loading" { "Loading listings…" }
                            }
                            QueryState::Failed(message) => {
                                (inline_error(&format!("Could not load listings: {message}"), &view.url()))
                            }
                            QueryState::Ready(listings) => {
                                p class="result-count" {
                                    strong { (listings.len()) }
                                    @if listings.len() == 1 { " place found" } @else { " places found" }
                                }
                                @if listings.is_empty() {
                                    p { "Nothing matches these filters." }
                                }
                                @for listing in listings.iter() {
                                    @let select_href = listing.position().map(|_| view.select_href(listing.id));
                                    (listing_card(
                                        listing,
                                        selection.is(listing.id),
                                        category_name(listing.category_id),
                                        select_href.as_deref(),
                                    ))
                                }
                            }
                        }
                    }
                }

                (map_panel(view))
            }
        },
    )
}
