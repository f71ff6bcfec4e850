//! Rental and revenue report aggregation.
//!
//! A [`RentalReport`] is built purely from the rental records of a date
//! range, so the same records always give the same report. Grouping uses
//! ordered maps; ties in rankings are broken by name.

use crate::libs::money::Money;
use crate::libs::rental::{Rental, RentalStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub rentals: usize,
    pub charges: Money,
    pub late_fees: Money,
    /// Charges plus late fees.
    pub revenue: Money,
    pub active: usize,
    pub overdue: usize,
    pub returned: usize,
    pub unique_customers: usize,
    pub unique_movies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    /// `YYYY-MM`
    pub month: String,
    pub rentals: usize,
    pub revenue: Money,
    pub unique_customers: usize,
    pub unique_movies: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRow {
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    pub rentals: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRow {
    pub genre: String,
    pub rentals: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub summary: ReportSummary,
    pub monthly: Vec<MonthlyRow>,
    pub top_movies: Vec<MovieRow>,
    pub genres: Vec<GenreRow>,
    pub rentals: Vec<Rental>,
}

#[derive(Default)]
struct MonthAcc {
    rentals: usize,
    revenue: Money,
    customers: BTreeSet<i64>,
    movies: BTreeSet<i64>,
}

impl RentalReport {
    /// Aggregates `records`; only rentals issued within `[from, to]` count.
    pub fn build(from: NaiveDate, to: NaiveDate, records: Vec<Rental>, top_limit: usize) -> Self {
        let mut rentals: Vec<Rental> = records.into_iter().filter(|r| r.rental_date >= from && r.rental_date <= to).collect();
        rentals.sort_by(|a, b| a.rental_date.cmp(&b.rental_date).then(a.id.cmp(&b.id)));

        let mut summary = ReportSummary::default();
        let mut customers = BTreeSet::new();
        let mut movie_ids = BTreeSet::new();
        let mut months: BTreeMap<String, MonthAcc> = BTreeMap::new();
        let mut movies: BTreeMap<i64, MovieRow> = BTreeMap::new();
        let mut genres: BTreeMap<String, GenreRow> = BTreeMap::new();

        for rental in &rentals {
            let revenue = rental.revenue();

            summary.rentals += 1;
            summary.charges += rental.charge;
            summary.late_fees += rental.late_fee;
            match rental.status {
                RentalStatus::Active => summary.active += 1,
                RentalStatus::Overdue => summary.overdue += 1,
                RentalStatus::Returned => summary.returned += 1,
            }
            customers.insert(rental.customer_id);
            movie_ids.insert(rental.movie_id);

            let month = months.entry(rental.rental_date.format("%Y-%m").to_string()).or_default();
            month.rentals += 1;
            month.revenue += revenue;
            month.customers.insert(rental.customer_id);
            month.movies.insert(rental.movie_id);

            let genre = rental.movie_genre.clone().unwrap_or_else(|| UNKNOWN_GENRE.to_string());

            let movie = movies.entry(rental.movie_id).or_insert_with(|| MovieRow {
                movie_id: rental.movie_id,
                title: rental.movie_title.clone(),
                genre: genre.clone(),
                rentals: 0,
                revenue: Money::zero(),
            });
            movie.rentals += 1;
            movie.revenue += revenue;

            let genre_row = genres.entry(genre.clone()).or_insert_with(|| GenreRow {
                genre,
                rentals: 0,
                revenue: Money::zero(),
            });
            genre_row.rentals += 1;
            genre_row.revenue += revenue;
        }

        summary.revenue = summary.charges + summary.late_fees;
        summary.unique_customers = customers.len();
        summary.unique_movies = movie_ids.len();

        let monthly = months
            .into_iter()
            .map(|(month, acc)| MonthlyRow {
                month,
                rentals: acc.rentals,
                revenue: acc.revenue,
                unique_customers: acc.customers.len(),
                unique_movies: acc.movies.len(),
            })
            .collect();

        let mut top_movies: Vec<MovieRow> = movies.into_values().collect();
        top_movies.sort_by(|a, b| {
            b.rentals
                .cmp(&a.rentals)
                .then(b.revenue.cmp(&a.revenue))
                .then(a.title.cmp(&b.title))
                .then(a.movie_id.cmp(&b.movie_id))
        });
        top_movies.truncate(top_limit);

        let mut genres: Vec<GenreRow> = genres.into_values().collect();
        genres.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.genre.cmp(&b.genre)));

        Self {
            from,
            to,
            summary,
            monthly,
            top_movies,
            genres,
            rentals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental(id: i64, movie_id: i64, title: &str, genre: Option<&str>, customer_id: i64, on: NaiveDate, charge: i64, fee: i64) -> Rental {
        Rental {
            id,
            customer_id,
            movie_id,
            employee_id: 1,
            rental_date: on,
            due_date: on + chrono::Duration::days(3),
            return_date: None,
            charge: Money::from_cents(charge),
            late_fee: Money::from_cents(fee),
            status: if fee > 0 { RentalStatus::Returned } else { RentalStatus::Active },
            returned_by: None,
            customer_name: format!("Customer {}", customer_id),
            movie_title: title.to_string(),
            movie_genre: genre.map(str::to_string),
            employee_name: "Admin".to_string(),
        }
    }

    fn sample() -> Vec<Rental> {
        vec![
            rental(1, 10, "Alien", Some("Sci-Fi"), 1, date(2024, 1, 5), 600, 0),
            rental(2, 11, "Brazil", Some("Comedy"), 2, date(2024, 1, 20), 300, 200),
            rental(3, 10, "Alien", Some("Sci-Fi"), 2, date(2024, 2, 2), 600, 0),
            rental(4, 12, "Casablanca", None, 3, date(2024, 2, 14), 900, 0),
            rental(5, 11, "Brazil", Some("Comedy"), 1, date(2024, 3, 1), 300, 0),
        ]
    }

    #[test]
    fn totals_match_records() {
        let report = RentalReport::build(date(2024, 1, 1), date(2024, 2, 29), sample(), 10);
        assert_eq!(report.summary.rentals, 4);
        assert_eq!(report.summary.charges, Money::from_cents(2400));
        assert_eq!(report.summary.late_fees, Money::from_cents(200));
        assert_eq!(report.summary.revenue, Money::from_cents(2600));
        let per_record: Money = report.rentals.iter().map(Rental::revenue).sum();
        assert_eq!(per_record, report.summary.revenue);
        assert_eq!(report.summary.unique_customers, 3);
        assert_eq!(report.summary.returned, 1);
        assert_eq!(report.summary.active, 3);
    }

    #[test]
    fn monthly_rows_are_ordered() {
        let report = RentalReport::build(date(2024, 1, 1), date(2024, 12, 31), sample(), 10);
        let months: Vec<&str> = report.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(report.monthly[0].rentals, 2);
        assert_eq!(report.monthly[0].revenue, Money::from_cents(1100));
        assert_eq!(report.monthly[0].unique_customers, 2);
    }

    #[test]
    fn top_movies_rank_by_count_then_revenue() {
        let report = RentalReport::build(date(2024, 1, 1), date(2024, 12, 31), sample(), 2);
        assert_eq!(report.top_movies.len(), 2);
        assert_eq!(report.top_movies[0].title, "Alien");
        assert_eq!(report.top_movies[0].rentals, 2);
        assert_eq!(report.top_movies[1].title, "Brazil");
    }

    #[test]
    fn missing_genre_is_grouped() {
        let report = RentalReport::build(date(2024, 1, 1), date(2024, 12, 31), sample(), 10);
        let unknown = report.genres.iter().find(|g| g.genre == UNKNOWN_GENRE).unwrap();
        assert_eq!(unknown.rentals, 1);
        assert_eq!(report.genres[0].genre, "Sci-Fi");
    }

    #[test]
    fn range_is_inclusive_and_build_is_repeatable() {
        let a = RentalReport::build(date(2024, 1, 5), date(2024, 2, 2), sample(), 10);
        let b = RentalReport::build(date(2024, 1, 5), date(2024, 2, 2), sample(), 10);
        assert_eq!(a.summary.rentals, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_range() {
        let report = RentalReport::build(date(2023, 1, 1), date(2023, 12, 31), sample(), 10);
        assert!(report.is_empty());
        assert_eq!(report.summary.revenue, Money::zero());
        assert!(report.monthly.is_empty());
    }
}
