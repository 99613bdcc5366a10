use crate::domain::Category;
use crate::filters::predicate::{KEYWORD, PRICE_LEVELS};
use crate::filters::FilterPredicate;
use crate::map::MapSdk;
use crate::view::DirectoryView;
use maud::{html, Markup};
use url::form_urlencoded;

/// Amenity filters offered in the bar, as (value, label).
pub const AMENITY_OPTIONS: &[(&str, &str)] = &[
    ("wifi", "Wi-Fi"),
    ("parking", "Parking"),
    ("pool", "Pool"),
    ("breakfast", "Breakfast"),
    ("air-conditioning", "Air conditioning"),
    ("pet-friendly", "Pet friendly"),
];

pub const ACCESSIBILITY_OPTIONS: &[(&str, &str)] = &[
    ("wheelchair-accessible", "Wheelchair accessible"),
    ("accessible-parking", "Accessible parking"),
    ("accessible-restroom", "Accessible restroom"),
    ("step-free-entrance", "Step-free entrance"),
];

pub fn filter_bar<S: MapSdk>(view: &DirectoryView<S>, categories: &[Category]) -> Markup {
    let filters = view.filters();

    html! {
        aside class="filter-bar" aria-label="Filters" {
            (keyword_form(view))

            @if !categories.is_empty() {
                section {
                    h4 { "Category" }
                    ul {
                        li {
                            a.is-active[filters.category_id.is_none()]
                                href=(view.href(&filters.with_category(None))) { "All" }
                        }
                        @for category in categories {
                            @let active = filters.category_id == Some(category.id);
                            li {
                                a.is-active[active]
                                    href=(view.href(&filters.with_category(if active { None } else { Some(category.id) })))
                                { (category.name) }
                            }
                        }
                    }
                }
            }

            section {
                h4 { "Price" }
                @for level in PRICE_LEVELS {
                    @let active = filters.price_levels.contains(&level);
                    a.price-toggle.is-active[active]
                        href=(view.href(&filters.with_price_level_toggled(level)))
                        aria-pressed=(active.to_string())
                    { ("$".repeat(level as usize)) }
                    " "
                }
            }

            section {
                h4 { "Rating" }
                @for min in [3u8, 4, 5] {
                    @let active = filters.rating == Some(min);
                    a.is-active[active]
                        href=(view.href(&filters.with_rating(if active { None } else { Some(min) })))
                    { (min) "+ ★" }
                    " "
                }
            }

            (toggle_section(
                "Amenities",
                AMENITY_OPTIONS,
                &filters.amenities,
                |value| view.href(&filters.with_amenity_toggled(value)),
            ))
            (toggle_section(
                "Accessibility",
                ACCESSIBILITY_OPTIONS,
                &filters.accessibility,
                |value| view.href(&filters.with_accessibility_toggled(value)),
            ))

            @if !filters.is_empty() {
                a href=(view.href(&FilterPredicate::default())) class="clear-filters" { "Clear all filters" }
            }
        }
    }
}

/// GET form that submits the keyword together with the other active filters.
fn keyword_form<S: MapSdk>(view: &DirectoryView<S>) -> Markup {
    let filters = view.filters();
    let others = filters.without_keyword().to_query();
    let hidden: Vec<(String, String)> = form_urlencoded::parse(others.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    html! {
        form method="get" action=(view.store().path()) role="search" {
            @for (name, value) in &hidden {
                input type="hidden" name=(name) value=(value);
            }
            label for="keyword" class="sr-only" { "Search" }
            input type="search" id="keyword" name=(KEYWORD)
                value=(filters.keyword.as_deref().unwrap_or(""))
                placeholder="Search hotels, restaurants, tours…";
            button type="submit" { "Search" }
        }
    }
}

/// Offered options plus any active value the bar does not list, so every
/// active filter can be switched off.
fn toggle_section<F>(
    title: &str,
    options: &[(&str, &str)],
    active: &std::collections::BTreeSet<String>,
    href: F,
) -> Markup
where
    F: Fn(&str) -> String,
{
    let extra: Vec<&String> = active
        .iter()
        .filter(|value| !options.iter().any(|(v, _)| *v == value.as_str()))
        .collect();

    html! {
        section {
            h4 { (title) }
            ul {
                @for (value, label) in options {
                    @let on = active.contains(*value);
                    li {
                        a.is-active[on] href=(href(value)) aria-pressed=(on.to_string()) { (label) }
                    }
                }
                @for value in extra {
                    li {
                        a.is-active href=(href(value)) aria-pressed="true" { (value) }
                    }
                }
            }
        }
    }
}
