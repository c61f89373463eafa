//! Showtime catalog loading.

use domain::{Catalog, Movie};
use thiserror::Error;

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Loads the catalog at `path`, or the built-in catalog when there is none.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog, CatalogLoadError> {
    let Some(path) = path else {
        return Ok(builtin_catalog());
    };

    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_string(),
        source,
    })?;
    Catalog::from_json(&json).map_err(|source| CatalogLoadError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Catalog served when no catalog file is configured.
pub fn builtin_catalog() -> Catalog {
    let times = |list: &[&str]| -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    };

    Catalog::new(vec![
        Movie::new("Inception", times(&["10:30", "14:00", "18:00", "21:30"])),
        Movie::new("Interstellar", times(&["11:00", "15:15", "19:45"])),
        Movie::new("Dune: Part Two", times(&["9:45", "13:30", "17:15", "21:00"])),
        Movie::new("Oppenheimer", times(&["12:00", "16:30", "20:15"])),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_showtimes_normalize() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.movies().len(), 4);
        assert_eq!(
            catalog.showtimes("Dune: Part Two").unwrap()[0],
            "09:45"
        );
    }

    #[test]
    fn test_missing_catalog_file() {
        let result = load_catalog(Some("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }
}
