//! Demo catalogue loaded by `init-db --sample-data`.

use crate::libs::customer::CustomerDraft;
use crate::libs::money::Money;
use crate::libs::movie::MovieDraft;

/// Rows added by one seeding run; zero on a database that already has them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub movies: usize,
    pub customers: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.movies == 0 && self.customers == 0
    }
}

#[allow(clippy::too_many_arguments)]
fn movie(title: &str, director: &str, genre: &str, year: i32, minutes: i32, description: &str, cents: i64, copies: i64) -> MovieDraft {
    MovieDraft::new(title, Money::from_cents(cents), copies)
        .with_director(director)
        .with_genre(genre)
        .with_release_year(year)
        .with_duration(minutes)
        .with_description(description)
}

pub fn movies() -> Vec<MovieDraft> {
    vec![
        movie(
            "The Shawshank Redemption",
            "Frank Darabont",
            "Drama",
            1994,
            142,
            "Two imprisoned men bond over a number of years...",
            299,
            5,
        ),
        movie(
            "The Godfather",
            "Francis Ford Coppola",
            "Crime",
            1972,
            175,
            "The aging patriarch of an organized crime dynasty...",
            349,
            3,
        ),
        movie(
            "The Dark Knight",
            "Christopher Nolan",
            "Action",
            2008,
            152,
            "When the menace known as the Joker wreaks havoc...",
            399,
            4,
        ),
        movie(
            "Pulp Fiction",
            "Quentin Tarantino",
            "Crime",
            1994,
            154,
            "The lives of two mob hitmen, a boxer, a gangster...",
            299,
            2,
        ),
        movie(
            "Forrest Gump",
            "Robert Zemeckis",
            "Drama",
            1994,
            142,
            "The presidencies of Kennedy and Johnson...",
            249,
            6,
        ),
    ]
}

pub fn customers() -> Vec<CustomerDraft> {
    vec![
        CustomerDraft::new("John", "Doe")
            .with_email("john.doe@email.com")
            .with_phone("+1234567890")
            .with_address("123 Main St, City, State"),
        CustomerDraft::new("Jane", "Smith")
            .with_email("jane.smith@email.com")
            .with_phone("+1234567891")
            .with_address("456 Oak Ave, City, State"),
        CustomerDraft::new("Bob", "Johnson")
            .with_email("bob.johnson@email.com")
            .with_phone("+1234567892")
            .with_address("789 Pine Rd, City, State"),
    ]
}
