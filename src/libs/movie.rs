use crate::libs::money::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub description: Option<String>,
    pub rental_rate: Money,
    /// Copies on the shelf right now.
    pub stock: i64,
    pub total_copies: i64,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: String,
}

impl Movie {
    pub fn rented_out(&self) -> i64 {
        self.total_copies - self.stock
    }
}

/// Editable movie fields, used for both insert and update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieDraft {
    pub title: String,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub description: Option<String>,
    pub rental_rate: Money,
    pub total_copies: i64,
}

impl MovieDraft {
    pub fn new(title: &str, rental_rate: Money, total_copies: i64) -> Self {
        Self {
            title: title.to_string(),
            rental_rate,
            total_copies,
            ..Self::default()
        }
    }

    pub fn with_genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    pub fn with_director(mut self, director: &str) -> Self {
        self.director = Some(director.to_string());
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl From<&Movie> for MovieDraft {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            release_year: movie.release_year,
            duration_minutes: movie.duration_minutes,
            description: movie.description.clone(),
            rental_rate: movie.rental_rate,
            total_copies: movie.total_copies,
        }
    }
}

/// Catalogue search criteria. Empty filter lists every active movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
    pub min_rate: Option<Money>,
    pub max_rate: Option<Money>,
    pub available_only: bool,
    pub include_retired: bool,
}

impl MovieFilter {
    pub fn title(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }
}
