// src/filters/predicate.rs

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use url::form_urlencoded;

pub const KEYWORD: &str = "keyword";
pub const CATEGORY_ID: &str = "categoryId";
pub const PRICE_LEVEL: &str = "priceLevel";
pub const AMENITIES: &str = "amenities";
pub const ACCESSIBILITY: &str = "accessibility";
pub const RATING: &str = "rating";

pub const PRICE_LEVELS: RangeInclusive<u8> = 1..=4;
pub const RATINGS: RangeInclusive<u8> = 1..=5;

const MAX_TEXT_LEN: usize = 100;

/// The active search constraints of the directory page.
///
/// `None` / empty set means "no constraint on that field". The sets are
/// ordered so that [`FilterPredicate::to_query`] is canonical: two equal
/// predicates always serialize to the same string, which is what the listing
/// cache keys on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterPredicate {
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub price_levels: BTreeSet<u8>,
    pub amenities: BTreeSet<String>,
    pub accessibility: BTreeSet<String>,
    /// Minimum rating.
    pub rating: Option<u8>,
}

impl FilterPredicate {
    /// Parses a URL query string (with or without the leading `?`).
    ///
    /// Never fails: unknown keys, malformed numbers, out-of-range values and
    /// blank strings are dropped. For single-valued keys the first valid
    /// occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut p = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                KEYWORD if p.keyword.is_none() => p.keyword = clean_text(&value),
                CATEGORY_ID if p.category_id.is_none() => {
                    p.category_id = value.trim().parse::<i64>().ok().filter(|id| *id > 0)
                }
                PRICE_LEVEL => {
                    if let Some(level) = parse_in_range(&value, PRICE_LEVELS) {
                        p.price_levels.insert(level);
                    }
                }
                AMENITIES => {
                    if let Some(amenity) = clean_text(&value) {
                        p.amenities.insert(amenity);
                    }
                }
                ACCESSIBILITY => {
                    if let Some(feature) = clean_text(&value) {
                        p.accessibility.insert(feature);
                    }
                }
                RATING if p.rating.is_none() => p.rating = parse_in_range(&value, RATINGS),
                _ => {}
            }
        }

        p
    }

    /// Canonical query string, without the leading `?`.
    ///
    /// Empty or invalid constraints are omitted, so the predicate with no
    /// filters serializes to `""`.
    pub fn to_query(&self) -> String {
        let p = self.normalized();
        let mut out = form_urlencoded::Serializer::new(String::new());

        if let Some(keyword) = &p.keyword {
            out.append_pair(KEYWORD, keyword);
        }
        if let Some(id) = p.category_id {
            out.append_pair(CATEGORY_ID, &id.to_string());
        }
        for level in &p.price_levels {
            out.append_pair(PRICE_LEVEL, &level.to_string());
        }
        for amenity in &p.amenities {
            out.append_pair(AMENITIES, amenity);
        }
        for feature in &p.accessibility {
            out.append_pair(ACCESSIBILITY, feature);
        }
        if let Some(rating) = p.rating {
            out.append_pair(RATING, &rating.to_string());
        }

        out.finish()
    }

    /// The nearest valid predicate: the one `from_query(to_query(self))` yields.
    pub fn normalized(&self) -> Self {
        Self {
            keyword: self.keyword.as_deref().and_then(clean_text),
            category_id: self.category_id.filter(|id| *id > 0),
            price_levels: self
                .price_levels
                .iter()
                .copied()
                .filter(|l| PRICE_LEVELS.contains(l))
                .collect(),
            amenities: self.amenities.iter().filter_map(|a| clean_text(a)).collect(),
            accessibility: self
                .accessibility
                .iter()
                .filter_map(|a| clean_text(a))
                .collect(),
            rating: self.rating.filter(|r| RATINGS.contains(r)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    pub fn toggle_price_level(&mut self, level: u8) {
        toggle(&mut self.price_levels, level);
    }

    pub fn toggle_amenity(&mut self, amenity: &str) {
        toggle(&mut self.amenities, amenity.trim().to_string());
    }

    pub fn toggle_accessibility(&mut self, feature: &str) {
        toggle(&mut self.accessibility, feature.trim().to_string());
    }

    // Link builders for the filter bar: each returns the predicate one click away.

    pub fn with_price_level_toggled(&self, level: u8) -> Self {
        let mut next = self.clone();
        next.toggle_price_level(level);
        next
    }

    pub fn with_amenity_toggled(&self, amenity: &str) -> Self {
        let mut next = self.clone();
        next.toggle_amenity(amenity);
        next
    }

    pub fn with_accessibility_toggled(&self, feature: &str) -> Self {
        let mut next = self.clone();
        next.toggle_accessibility(feature);
        next
    }

    pub fn with_category(&self, category_id: Option<i64>) -> Self {
        Self {
            category_id,
            ..self.clone()
        }
    }

    pub fn with_rating(&self, rating: Option<u8>) -> Self {
        Self {
            rating,
            ..self.clone()
        }
    }

    pub fn without_keyword(&self) -> Self {
        Self {
            keyword: None,
            ..self.clone()
        }
    }
}

/// Set semantics: a value already present is removed.
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn clean_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value.chars().count() > MAX_TEXT_LEN {
        return None;
    }
    Some(value.to_string())
}

fn parse_in_range(raw: &str, range: RangeInclusive<u8>) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|v| range.contains(v))
}
