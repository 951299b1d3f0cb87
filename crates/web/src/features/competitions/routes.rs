use axum::{Router, routing::get};

use super::handlers::{
    get_competition, get_competition_public_wcif, get_competition_wcif, list_competitions,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_competitions))
        .route("/:competition_id", get(get_competition))
        .route("/:competition_id/wcif", get(get_competition_wcif))
        .route("/:competition_id/wcif/public", get(get_competition_public_wcif))
}
