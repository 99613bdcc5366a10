use maud::{html, Markup};

pub mod error;
pub mod filter_bar;
pub mod form_field;
pub mod listing_card;
pub mod map_panel;

pub use error::html_error_response;
pub use filter_bar::filter_bar;
pub use form_field::{field_error, text_field};
pub use listing_card::listing_card;
pub use map_panel::map_panel;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Inline failure with a manual retry link.
pub fn inline_error(message: &str, retry_href: &str) -> Markup {
    html! {
        div class="inline-error" role="alert" {
            p { (message) }
            a href=(retry_href) class="retry" { "Try again" }
        }
    }
}
