use crate::domain::Listing;
use maud::{html, Markup};

/// One result in the list view. `select_href` is set when the listing can be
/// shown on the map.
pub fn listing_card(
    listing: &Listing,
    selected: bool,
    category: Option<&str>,
    select_href: Option<&str>,
) -> Markup {
    html! {
        article.listing-card.is-selected[selected]
            id=(format!("listing-{}", listing.id))
            aria-current=[selected.then_some("true")]
        {
            @if let Some(image) = listing.images.first() {
                img src=(image) alt=(listing.name) width="120" loading="lazy";
            }
            h3 { a href=(format!("/businesses/{}", listing.id)) { (listing.name) } }
            p {
                @if let Some(category) = category {
                    span class="badge" { (category) }
                }
                @if let Some(price) = listing.price_label() {
                    span class="badge price" { (price) }
                }
                @if let Some(rating) = listing.rating_label() {
                    span class="badge rating" { (rating) }
                }
                @if listing.claimed {
                    span class="badge claimed" { "Verified owner" }
                }
            }
            @if !listing.tags.is_empty() {
                p class="tags" {
                    @for tag in &listing.tags {
                        span class="badge tag" { (tag) }
                    }
                }
            }
            @match select_href {
                Some(href) => a href=(href) class="show-on-map" { "Show on map" },
                None => span class="no-location" { "No map location" },
            }
        }
    }
}
