use crate::domain::{Category, Listing};
use crate::templates::components::card;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn business_page(listing: &Listing, category: Option<&Category>) -> Markup {
    desktop_layout(
        &listing.name,
        html! {
            main class="business" {
                p { a href="/businesses" { "← Back to results" } }
                h1 { (listing.name) }
                p {
                    @if let Some(category) = category {
                        span class="badge" { (category.name) }
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

                @if !listing.images.is_empty() {
                    div class="gallery" {
                        @for image in &listing.images {
                            img src=(image) alt=(listing.name) width="240" loading="lazy";
                        }
                    }
                }

                @if let Some(description) = &listing.description {
                    p class="description" { (description) }
                }

                (card("Contact", html! {
                    dl {
                        @if let Some(address) = &listing.address {
                            dt { "Address" } dd { (address) }
                        }
                        @if let Some(phone) = &listing.phone {
                            dt { "Phone" } dd { a href=(format!("tel:{phone}")) { (phone) } }
                        }
                        @if let Some(website) = &listing.website {
                            dt { "Website" } dd { a href=(website) rel="noopener" { (website) } }
                        }
                        @if let Some(c) = listing.position() {
                            dt { "Location" } dd { (format!("{:.5}, {:.5}", c.lat, c.lng)) }
                        }
                    }
                }))

                @if !listing.amenities.is_empty() {
                    (card("Amenities", html! {
                        ul { @for a in &listing.amenities { li { (a) } } }
                    }))
                }

                @if !listing.accessibility.is_empty() {
                    (card("Accessibility", html! {
                        ul { @for a in &listing.accessibility { li { (a) } } }
                    }))
                }

                @if !listing.claimed {
                    p class="claim-cta" {
                        "Own or manage this business? "
                        a href=(format!("/businesses/{}/claim", listing.id)) { "Claim this listing" }
                    }
                }
            }
        },
    )
}
