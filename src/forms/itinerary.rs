// src/forms/itinerary.rs

use crate::domain::{ListingId, NewItinerary};
use crate::forms::fields::{check_length, optional, FieldErrors, FormData};
use chrono::NaiveDate;

pub const NAME: &str = "name";
pub const START_DATE: &str = "startDate";
pub const END_DATE: &str = "endDate";
pub const NOTES: &str = "notes";
pub const BUSINESS_ID: &str = "businessId";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItineraryForm {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub notes: String,
    pub business_ids: Vec<String>,
}

impl ItineraryForm {
    pub fn from_form(data: &FormData) -> Self {
        Self {
            name: data.text(NAME),
            start_date: data.text(START_DATE),
            end_date: data.text(END_DATE),
            notes: data.text(NOTES),
            business_ids: data.all(BUSINESS_ID),
        }
    }

    pub fn validate(&self) -> Result<NewItinerary, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.is_empty() {
            errors.add(NAME, "Give the trip a name.");
        } else {
            check_length(&mut errors, NAME, &self.name, 1, 100);
        }

        let start = parse_date(&mut errors, START_DATE, &self.start_date, "Start date");
        let end = parse_date(&mut errors, END_DATE, &self.end_date, "End date");
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.add(END_DATE, "End date must not be before the start date.");
            }
        }

        check_length(&mut errors, NOTES, &self.notes, 0, 1000);

        let mut business_ids: Vec<ListingId> = Vec::new();
        for raw in self.business_ids.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            match raw.parse::<ListingId>() {
                Ok(id) if id > 0 => {
                    if !business_ids.contains(&id) {
                        business_ids.push(id);
                    }
                }
                _ => errors.add(BUSINESS_ID, "Unknown business selected."),
            }
        }

        match (start, end) {
            (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(NewItinerary {
                name: self.name.clone(),
                start_date,
                end_date,
                notes: optional(&self.notes),
                business_ids,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_date(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    label: &str,
) -> Option<NaiveDate> {
    if raw.is_empty() {
        errors.add(field, format!("{label} is required."));
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, format!("{label} must be a date (YYYY-MM-DD)."));
            None
        }
    }
}
