//! HTTP route handlers for the listing service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /random                     - One cafe, picked uniformly at random
//! GET    /all                        - Every cafe
//! GET    /search?loc=...             - Cafes at an exact location
//!
//! # Mutating (require ?api_key=...)
//! POST   /add                        - Create a cafe (urlencoded form body)
//! PATCH  /update-price/{id}          - Overwrite the coffee price (?new_price=...)
//! DELETE /report-closed/{id}         - Delete a cafe
//! ```

pub mod listings;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

/// Create the listing routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/random", get(listings::get_random))
        .route("/all", get(listings::get_all))
        .route("/search", get(listings::search_by_location))
        .route("/add", post(listings::add))
        .route("/update-price/{id}", patch(listings::update_price))
        .route("/report-closed/{id}", delete(listings::report_closed))
}
