//! Showtime catalog endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::booking_dates;
use serde::Serialize;
use store::DocumentStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CatalogResponse {
    pub movies: Vec<MovieResponse>,
    /// Bookable dates, today first.
    pub dates: Vec<String>,
    pub experiences: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct MovieResponse {
    pub title: String,
    pub thumbnail: Option<String>,
    pub showtimes: Vec<String>,
}

/// GET /catalog — movies, bookable dates and experiences.
#[tracing::instrument(skip(state))]
pub async fn get<S: DocumentStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let movies = state
        .catalog
        .movies()
        .iter()
        .map(|movie| {
            let showtimes = state
                .catalog
                .showtimes(&movie.title)
                .map_err(|e| ApiError::Internal(format!("Bad catalog entry: {e}")))?;
            Ok(MovieResponse {
                title: movie.title.clone(),
                thumbnail: movie.thumbnail.clone(),
                showtimes,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(CatalogResponse {
        movies,
        dates: booking_dates(chrono::Local::now().date_naive()),
        experiences: state
            .catalog
            .experiences()
            .iter()
            .map(|experience| experience.as_str())
            .collect(),
    }))
}
