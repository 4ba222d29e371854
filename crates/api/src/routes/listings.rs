//! Listing route handlers.
//!
//! Read endpoints are public; mutating endpoints ask the state's
//! [`Authorizer`](crate::auth::Authorizer) before touching the store.

use axum::{
    Form, Json,
    extract::{Path, Query, State},
};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use brewfinder_core::{ListingId, ListingName};

use crate::db::{ListingRepository, RepositoryError};
use crate::error::AppError;
use crate::models::listing::{Listing, NewListing, amenity_flag};
use crate::state::AppState;

/// Success envelope for a single record.
#[derive(Debug, Serialize)]
pub struct CafeEnvelope {
    pub cafe: Listing,
}

/// Success envelope for a list of records.
#[derive(Debug, Serialize)]
pub struct CafesEnvelope {
    pub cafes: Vec<Listing>,
}

/// Report envelope returned by every mutating operation.
#[derive(Debug, Serialize)]
pub struct ActionEnvelope {
    pub response: ActionOutcome,
}

/// The body of an [`ActionEnvelope`]: `{"success": ...}` or `{"error": ...}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOutcome {
    Success(String),
    Error(String),
}

impl ActionEnvelope {
    fn success(message: impl Into<String>) -> Self {
        Self {
            response: ActionOutcome::Success(message.into()),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            response: ActionOutcome::Error(message.into()),
        }
    }
}

/// Query parameters carrying only the shared secret.
#[derive(Debug, Deserialize)]
pub struct KeyParams {
    pub api_key: Option<String>,
}

/// Query parameters for the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub loc: Option<String>,
}

/// Query parameters for the price update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdatePriceParams {
    pub new_price: Option<String>,
    pub api_key: Option<String>,
}

/// Form fields for creating a listing.
///
/// Everything is optional at the extractor level; presence rules are applied
/// in [`build_new_listing`] so that a missing field produces the service's
/// own validation message instead of a framework rejection.
#[derive(Debug, Deserialize)]
pub struct AddCafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub loc: Option<String>,
    pub seats: Option<String>,
    pub sockets: Option<String>,
    pub toilet: Option<String>,
    pub wifi: Option<String>,
    pub calls: Option<String>,
    pub coffee_price: Option<String>,
}

/// GET /random
///
/// Pick one cafe uniformly at random over the current record count.
/// Repeats across calls are expected.
pub async fn get_random(State(state): State<AppState>) -> crate::error::Result<Json<CafeEnvelope>> {
    let listings = ListingRepository::new(state.pool()).list_all().await?;

    let cafe = listings
        .choose(&mut rand::rng())
        .cloned()
        .ok_or(AppError::EmptyCollection)?;

    Ok(Json(CafeEnvelope { cafe }))
}

/// GET /all
///
/// Every cafe, in the store's natural iteration order (not guaranteed stable).
pub async fn get_all(State(state): State<AppState>) -> crate::error::Result<Json<CafesEnvelope>> {
    let cafes = ListingRepository::new(state.pool()).list_all().await?;

    Ok(Json(CafesEnvelope { cafes }))
}

/// GET /search?loc=...
///
/// Exact, case-sensitive match on the location field. Zero matches (including
/// a missing `loc` parameter, which matches nothing) is a not-found error.
pub async fn search_by_location(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> crate::error::Result<Json<CafesEnvelope>> {
    let cafes = match params.loc.as_deref() {
        Some(loc) => {
            ListingRepository::new(state.pool())
                .find_by_location(loc)
                .await?
        }
        None => Vec::new(),
    };

    if cafes.is_empty() {
        return Err(AppError::NotFound(
            "Sorry, we don't have a cafe at that location.".to_owned(),
        ));
    }

    Ok(Json(CafesEnvelope { cafes }))
}

/// POST /add?api_key=...
///
/// Create a cafe from urlencoded form fields. Validation and duplicate-name
/// failures are reported in the response body with a stable message; the
/// store's raw error text is never echoed.
#[instrument(skip(state, params, form), fields(name = ?form.name))]
pub async fn add(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
    Form(form): Form<AddCafeForm>,
) -> crate::error::Result<Json<ActionEnvelope>> {
    if !state.authorizer().authorize(params.api_key.as_deref()) {
        return Err(AppError::Forbidden);
    }

    let new = match build_new_listing(form) {
        Ok(new) => new,
        Err(reason) => {
            return Ok(Json(ActionEnvelope::error(format!(
                "creation failed: {reason}"
            ))));
        }
    };

    match ListingRepository::new(state.pool()).create(&new).await {
        Ok(created) => {
            tracing::info!(id = %created.id, name = %created.name, "cafe added");
            Ok(Json(ActionEnvelope::success(
                "Successfully added the new cafe.",
            )))
        }
        Err(RepositoryError::Conflict(_)) => Ok(Json(ActionEnvelope::error(
            "creation failed: a cafe with that name already exists",
        ))),
        Err(err) => Err(err.into()),
    }
}

/// PATCH /update-price/{id}?new_price=...&api_key=...
///
/// Overwrite the coffee price and nothing else. A missing `new_price`
/// clears the stored price.
#[instrument(skip(state, params))]
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UpdatePriceParams>,
) -> crate::error::Result<Json<ActionEnvelope>> {
    if !state.authorizer().authorize(params.api_key.as_deref()) {
        return Err(AppError::Forbidden);
    }

    ListingRepository::new(state.pool())
        .update_price(ListingId::new(id), params.new_price.as_deref())
        .await?;

    Ok(Json(ActionEnvelope::success(
        "Successfully updated the price.",
    )))
}

/// DELETE /report-closed/{id}?api_key=...
///
/// Delete a cafe. The key is checked before the lookup, so an unauthorized
/// caller can't probe which IDs exist.
#[instrument(skip(state, params))]
pub async fn report_closed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<KeyParams>,
) -> crate::error::Result<Json<ActionEnvelope>> {
    if !state.authorizer().authorize(params.api_key.as_deref()) {
        return Err(AppError::Forbidden);
    }

    ListingRepository::new(state.pool())
        .delete(ListingId::new(id))
        .await?;

    Ok(Json(ActionEnvelope::success(
        "Successfully deleted the cafe from the database.",
    )))
}

/// Apply presence rules and the amenity coercion to the raw form.
///
/// Required fields: `name` (non-empty), `map_url`, `img_url`, `loc`, `seats`.
/// Amenity flags follow the tri-state mapping in
/// [`amenity_flag`](crate::models::listing::amenity_flag); `coffee_price`
/// passes through untouched.
fn build_new_listing(form: AddCafeForm) -> std::result::Result<NewListing, String> {
    let name_raw = required(form.name, "name")?;
    let name = ListingName::parse(&name_raw).map_err(|e| e.to_string())?;

    let has_sockets = amenity_flag(form.sockets.as_deref());
    let has_toilet = amenity_flag(form.toilet.as_deref());
    let has_wifi = amenity_flag(form.wifi.as_deref());
    let can_take_calls = amenity_flag(form.calls.as_deref());

    Ok(NewListing {
        name,
        map_url: required(form.map_url, "map_url")?,
        img_url: required(form.img_url, "img_url")?,
        location: required(form.loc, "loc")?,
        seats: required(form.seats, "seats")?,
        has_sockets,
        has_toilet,
        has_wifi,
        can_take_calls,
        coffee_price: form.coffee_price,
    })
}

fn required(field: Option<String>, name: &str) -> std::result::Result<String, String> {
    field.ok_or_else(|| format!("missing required field `{name}`"))
}
