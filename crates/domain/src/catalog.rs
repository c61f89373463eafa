//! Showtime catalog: movies, bookable dates and experiences.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::pricing::Experience;

/// Number of days, starting today, that can be booked.
pub const BOOKING_WINDOW_DAYS: u64 = 14;

/// A movie and the times it screens each day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub showtimes: Vec<String>,
}

impl Movie {
    /// Creates a movie with its daily showtimes.
    pub fn new(title: impl Into<String>, showtimes: Vec<String>) -> Self {
        Self {
            title: title.into(),
            thumbnail: None,
            showtimes,
        }
    }
}

/// The movies on offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Creates a catalog from a list of movies.
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Parses a catalog from a JSON document `{ "movies": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns every movie.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Looks up a movie by title.
    pub fn movie(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.title == title)
    }

    /// Returns a movie's showtimes as zero-padded `HH:MM` strings.
    ///
    /// Unknown movies have no showtimes.
    pub fn showtimes(&self, title: &str) -> Result<Vec<String>, ValidationError> {
        self.movie(title)
            .map(|movie| movie.showtimes.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|raw| normalize_showtime(raw))
            .collect()
    }

    /// Returns the experiences every screening is offered in.
    pub fn experiences(&self) -> &'static [Experience] {
        &Experience::ALL
    }
}

/// Dates that can be booked, starting at `today`, formatted `YYYY-MM-DD`.
pub fn booking_dates(today: NaiveDate) -> Vec<String> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect()
}

/// Normalizes `H:M` style times to `HH:MM`.
pub fn normalize_showtime(raw: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidShowtime(raw.to_string());

    let (hour, minute) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.trim().parse().map_err(|_| invalid())?;
    let minute: u8 = minute.trim().parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(format!("{hour:02}:{minute:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_dates_cover_two_weeks() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let dates = booking_dates(today);
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], "2025-12-25");
        assert_eq!(dates[7], "2026-01-01");
        assert_eq!(dates[13], "2026-01-07");
    }

    #[test]
    fn test_normalize_showtime() {
        assert_eq!(normalize_showtime("9:5").unwrap(), "09:05");
        assert_eq!(normalize_showtime("18:00").unwrap(), "18:00");
        assert_eq!(normalize_showtime(" 7:30 ").unwrap(), "07:30");
        assert!(normalize_showtime("24:00").is_err());
        assert!(normalize_showtime("12:60").is_err());
        assert!(normalize_showtime("noon").is_err());
    }

    #[test]
    fn test_catalog_showtimes() {
        let catalog = Catalog::from_json(
            r#"{ "movies": [ { "title": "Inception", "showtimes": ["9:0", "18:00"] } ] }"#,
        )
        .unwrap();

        assert_eq!(
            catalog.showtimes("Inception").unwrap(),
            vec!["09:00", "18:00"]
        );
        assert!(catalog.showtimes("Unknown").unwrap().is_empty());
        assert_eq!(catalog.experiences().len(), 3);
    }
}
