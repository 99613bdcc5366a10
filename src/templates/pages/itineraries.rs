use crate::domain::Itinerary;
use crate::forms::itinerary::{ItineraryForm, END_DATE, NAME, NOTES, START_DATE};
use crate::forms::FieldErrors;
use crate::templates::components::{field_error, inline_error, text_field};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn itineraries_page(
    itineraries: Result<&[Itinerary], &str>,
    form: &ItineraryForm,
    errors: &FieldErrors,
) -> Markup {
    desktop_layout(
        "My trips",
        html! {
            main class="itineraries" {
                h1 { "My trips" }

                @match itineraries {
                    Err(message) => {
                        (inline_error(&format!("Could not load your trips: {message}"), "/itineraries"))
                    }
                    Ok([]) => p { "No trips planned yet." },
                    Ok(list) => {
                        ul class="itinerary-list" {
                            @for it in list {
                                li id=(format!("itinerary-{}", it.id)) {
                                    strong { (it.name) }
                                    " · " (it.start_date.to_string()) " → " (it.end_date.to_string())
                                    " (" (it.days()) @if it.days() == 1 { " day" } @else { " days" } ")"
                                    @if !it.business_ids.is_empty() {
                                        " · " (it.business_ids.len()) " places"
                                    }
                                    @if let Some(notes) = &it.notes {
                                        p class="notes" { (notes) }
                                    }
                                    form method="post" action=(format!("/itineraries/{}/delete", it.id)) {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    h2 { "Plan a new trip" }
                    form method="post" action="/itineraries" novalidate {
                        (text_field(NAME, "Trip name", "text", &form.name, true, errors))
                        (text_field(START_DATE, "Start date", "date", &form.start_date, true, errors))
                        (text_field(END_DATE, "End date", "date", &form.end_date, true, errors))
                        div class="field" {
                            label for=(NOTES) { "Notes" }
                            textarea id=(NOTES) name=(NOTES) rows="3" { (form.notes) }
                            (field_error(errors, NOTES))
                        }
                        @for id in &form.business_ids {
                            input type="hidden" name="businessId" value=(id);
                        }
                        (field_error(errors, "businessId"))
                        button type="submit" { "Create trip" }
                    }
                }
            }
        },
    )
}
