use crate::domain::{Claim, Listing};
use crate::forms::claim::{ClaimForm, EMAIL, FULL_NAME, MESSAGE, PHONE, ROLE, ROLES};
use crate::forms::FieldErrors;
use crate::templates::components::{field_error, text_field};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn claim_page(listing: &Listing, form: &ClaimForm, errors: &FieldErrors) -> Markup {
    desktop_layout(
        &format!("Claim {}", listing.name),
        html! {
            main class="claim" {
                h1 { "Claim " (listing.name) }
                @if !errors.is_empty() {
                    div class="inline-error" role="alert" {
                        "Please fix the " (errors.len())
                        @if errors.len() == 1 { " highlighted field." } @else { " highlighted fields." }
                    }
                }
                form method="post" action=(format!("/businesses/{}/claim", listing.id)) novalidate {
                    (text_field(FULL_NAME, "Full name", "text", &form.full_name, true, errors))
                    (text_field(EMAIL, "Email", "email", &form.email, true, errors))
                    (text_field(PHONE, "Phone", "tel", &form.phone, false, errors))

                    div class="field" {
                        label for=(ROLE) { "Your role *" }
                        select id=(ROLE) name=(ROLE) required {
                            option value="" selected[form.role.is_empty()] { "Choose…" }
                            @for (value, label) in ROLES {
                                option value=(value) selected[form.role == *value] { (label) }
                            }
                        }
                        (field_error(errors, ROLE))
                    }

                    div class="field" {
                        label for=(MESSAGE) { "Anything we should know?" }
                        textarea id=(MESSAGE) name=(MESSAGE) rows="4" { (form.message) }
                        (field_error(errors, MESSAGE))
                    }

                    button type="submit" { "Submit claim" }
                }
            }
        },
    )
}

pub fn claim_submitted_page(listing: &Listing, claim: &Claim) -> Markup {
    desktop_layout(
        "Claim submitted",
        html! {
            main class="claim" {
                h1 { "Claim submitted" }
                p {
                    "We received your claim for " strong { (listing.name) }
                    ". Reference #" (claim.id) " (" (claim.status) ")."
                }
                p { a href=(format!("/businesses/{}", listing.id)) { "Back to the listing" } }
            }
        },
    )
}
