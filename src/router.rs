use crate::app::App;
use crate::domain::ListingId;
use crate::errors::ServerError;
use crate::filters::{FilterStore, History};
use crate::forms::{ClaimForm, FieldErrors, FormData, ItineraryForm};
use crate::map::{MapOptions, MapView, SceneMap};
use crate::responses::{
    html_response, html_response_with_status, redirect_response, text_response, ResultResp,
};
use crate::templates;
use crate::view::{split_selection, DirectoryView};
use astra::Request;
use std::io::Read;
use tracing::{info, warn};

pub const BUSINESSES_PATH: &str = "/businesses";

const MAX_FORM_BYTES: u64 = 64 * 1024;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().unwrap_or("").to_owned();

    info!(%method, %path, "request");

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => redirect_response(BUSINESSES_PATH),
        ("GET", ["health"]) => text_response("ok"),

        ("GET", ["businesses"]) => directory(app, &query),
        ("GET", ["businesses", id]) => business(app, parse_id(id)?),
        ("GET", ["businesses", id, "claim"]) => claim_form(app, parse_id(id)?),
        ("POST", ["businesses", id, "claim"]) => {
            let form = read_form(&mut req)?;
            submit_claim(app, parse_id(id)?, &form)
        }

        ("GET", ["itineraries"]) => {
            itineraries(app, &ItineraryForm::default(), &FieldErrors::new(), 200)
        }
        ("POST", ["itineraries"]) => {
            let form = read_form(&mut req)?;
            create_itinerary(app, &form)
        }
        ("POST", ["itineraries", id, "delete"]) => {
            let id = parse_id(id)?;
            app.api.delete_itinerary(id)?;
            info!(id, "itinerary deleted");
            redirect_response("/itineraries")
        }

        _ => Err(ServerError::NotFound),
    }
}

fn directory(app: &App, raw_query: &str) -> ResultResp {
    let (filter_query, selected) = split_selection(raw_query);
    let store = FilterStore::new(BUSINESSES_PATH, History::new(&filter_query));
    let map = MapView::load(SceneMap::load(&app.config.map), MapOptions::from(&app.config.map));
    let mut view = DirectoryView::new(store, map);

    // Malformed or non-canonical filter URLs are normalized, not rejected.
    if view.canonicalize_url() {
        let location = match selected {
            Some(id) => view.select_href(id),
            None => view.url(),
        };
        return redirect_response(&location);
    }

    let categories = app.api.list_categories().unwrap_or_else(|err| {
        warn!(error = %err, "categories unavailable");
        Vec::new()
    });

    view.show_results(app.listings(view.filters()));
    if let Some(id) = selected {
        if !view.select(id) {
            warn!(id, "ignoring selection outside the result set");
        }
    }

    html_response(templates::pages::directory_page(&view, &categories))
}

fn business(app: &App, id: ListingId) -> ResultResp {
    let listing = app.api.get_business(id)?;
    let categories = app.api.list_categories().unwrap_or_default();
    let category = categories.iter().find(|c| c.id == listing.category_id);
    html_response(templates::pages::business_page(&listing, category))
}

fn claim_form(app: &App, id: ListingId) -> ResultResp {
    let listing = app.api.get_business(id)?;
    if listing.claimed {
        return Err(ServerError::BadRequest(format!(
            "{} has already been claimed.",
            listing.name
        )));
    }
    html_response(templates::pages::claim_page(
        &listing,
        &ClaimForm::default(),
        &FieldErrors::new(),
    ))
}

fn submit_claim(app: &App, id: ListingId, data: &FormData) -> ResultResp {
    let listing = app.api.get_business(id)?;
    if listing.claimed {
        return Err(ServerError::BadRequest(format!(
            "{} has already been claimed.",
            listing.name
        )));
    }

    let form = ClaimForm::from_form(data);
    let request = match form.validate(id) {
        Ok(request) => request,
        Err(errors) => {
            info!(id, fields = errors.len(), "claim form rejected");
            return html_response_with_status(
                422,
                templates::pages::claim_page(&listing, &form, &errors),
            );
        }
    };

    let claim = app.api.create_claim(&request)?;
    info!(business = id, claim = claim.id, "claim submitted");
    app.invalidate_listings();

    html_response(templates::pages::claim_submitted_page(&listing, &claim))
}

fn itineraries(app: &App, form: &ItineraryForm, errors: &FieldErrors, status: u16) -> ResultResp {
    let list = app.api.list_itineraries().map_err(|err| {
        warn!(error = %err, "itineraries unavailable");
        err.to_string()
    });
    let page = templates::pages::itineraries_page(
        list.as_deref().map_err(String::as_str),
        form,
        errors,
    );
    html_response_with_status(status, page)
}

fn create_itinerary(app: &App, data: &FormData) -> ResultResp {
    let form = ItineraryForm::from_form(data);
    match form.validate() {
        Ok(new) => {
            let created = app.api.create_itinerary(&new)?;
            info!(id = created.id, "itinerary created");
            redirect_response("/itineraries")
        }
        Err(errors) => itineraries(app, &form, &errors, 422),
    }
}

fn parse_id(raw: &str) -> Result<ListingId, ServerError> {
    raw.parse::<ListingId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ServerError::NotFound)
}

fn read_form(req: &mut Request) -> Result<FormData, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Could not read form: {e}")))?;
    Ok(FormData::parse(&body))
}
