//! Business rules applied before anything is written.
//!
//! Everything here is pure: the caller supplies today's date through a
//! [`Clock`] so the date-dependent rules (release-year window, overdue
//! detection, late fees) are deterministic in tests.

use crate::libs::config::RentalPolicy;
use crate::libs::customer::CustomerDraft;
use crate::libs::employee::EmployeeDraft;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::money::Money;
use crate::libs::movie::MovieDraft;
use crate::libs::rental::{Rental, RentalStatus};
use crate::libs::security;
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::ops::RangeInclusive;

/// Highest daily rental rate a movie may carry ($10,000.00).
pub const MAX_RENTAL_RATE: Money = Money::from_cents(1_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

pub fn release_year_range(policy: &RentalPolicy, today: NaiveDate) -> RangeInclusive<i32> {
    policy.min_release_year..=today.year() + policy.max_years_ahead
}

/// Trims a text field and drops it when empty.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn require(value: &str, field: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_email(email: &str) -> StoreResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(StoreError::validation(format!("Invalid email address '{}'", email)));
    }
    Ok(())
}

pub fn normalize_movie(draft: &MovieDraft) -> MovieDraft {
    MovieDraft {
        title: draft.title.trim().to_string(),
        director: clean_optional(draft.director.clone()),
        genre: clean_optional(draft.genre.clone()),
        description: clean_optional(draft.description.clone()),
        ..draft.clone()
    }
}

pub fn validate_movie(draft: &MovieDraft, policy: &RentalPolicy, today: NaiveDate) -> StoreResult<()> {
    require(&draft.title, "Title")?;

    if let Some(year) = draft.release_year {
        let range = release_year_range(policy, today);
        if !range.contains(&year) {
            return Err(StoreError::validation(format!(
                "Release year {} is outside {}..={}",
                year,
                range.start(),
                range.end()
            )));
        }
    }
    if let Some(minutes) = draft.duration_minutes {
        if minutes <= 0 {
            return Err(StoreError::validation("Duration must be a positive number of minutes"));
        }
    }
    if draft.rental_rate.is_negative() {
        return Err(StoreError::validation("Rental rate cannot be negative"));
    }
    if draft.rental_rate > MAX_RENTAL_RATE {
        return Err(StoreError::validation(format!("Rental rate cannot exceed {} per day", MAX_RENTAL_RATE)));
    }
    if draft.total_copies < 0 {
        return Err(StoreError::validation("Total copies cannot be negative"));
    }
    Ok(())
}

/// Stock after changing total copies while `open_rentals` copies are out.
pub fn restocked(total_copies: i64, open_rentals: i64) -> StoreResult<i64> {
    if total_copies < open_rentals {
        return Err(StoreError::validation(format!(
            "Total copies ({}) cannot be lower than the {} copies currently rented",
            total_copies, open_rentals
        )));
    }
    Ok(total_copies - open_rentals)
}

pub fn normalize_customer(draft: &CustomerDraft) -> CustomerDraft {
    CustomerDraft {
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        email: clean_optional(draft.email.clone()).map(|e| e.to_lowercase()),
        phone: clean_optional(draft.phone.clone()),
        address: clean_optional(draft.address.clone()),
    }
}

pub fn validate_customer(draft: &CustomerDraft) -> StoreResult<()> {
    require(&draft.first_name, "First name")?;
    require(&draft.last_name, "Last name")?;
    if let Some(email) = &draft.email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_employee(draft: &EmployeeDraft) -> StoreResult<()> {
    require(&draft.username, "Username")?;
    if draft.username.trim().chars().any(char::is_whitespace) {
        return Err(StoreError::validation("Username cannot contain spaces"));
    }
    require(&draft.first_name, "First name")?;
    require(&draft.last_name, "Last name")?;
    require(&draft.email, "Email")?;
    validate_email(draft.email.trim())?;
    security::validate_password_strength(&draft.password)
}

/// Number of rental days; the due date must fall after the rental date.
pub fn rental_days(rental_date: NaiveDate, due_date: NaiveDate) -> StoreResult<i64> {
    let days = (due_date - rental_date).num_days();
    if days <= 0 {
        return Err(StoreError::validation(format!(
            "Due date {} must be after the rental date {}",
            due_date, rental_date
        )));
    }
    Ok(days)
}

pub fn rental_charge(rate: Money, rental_date: NaiveDate, due_date: NaiveDate) -> StoreResult<Money> {
    let days = rental_days(rental_date, due_date)?;
    rate.checked_mul(days)
        .ok_or_else(|| StoreError::validation(format!("Charge for {} days at {} per day is too large", days, rate)))
}

pub fn default_due_date(policy: &RentalPolicy, today: NaiveDate) -> NaiveDate {
    today + Duration::days(i64::from(policy.default_rental_days.max(1)))
}

pub fn late_days(due_date: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - due_date).num_days().max(0)
}

pub fn late_fee(policy: &RentalPolicy, due_date: NaiveDate, return_date: NaiveDate) -> StoreResult<Money> {
    let days = late_days(due_date, return_date);
    policy
        .late_fee_per_day
        .checked_mul(days)
        .ok_or_else(|| StoreError::validation(format!("Late fee for {} days at {} per day is too large", days, policy.late_fee_per_day)))
}

/// Returning is allowed from `Active` and `Overdue`.
pub fn check_return(rental: &Rental) -> StoreResult<()> {
    if rental.status == RentalStatus::Returned || rental.return_date.is_some() {
        let reason = match rental.return_date {
            Some(date) => format!("already returned on {}", date),
            None => "already returned".to_string(),
        };
        return Err(StoreError::InvalidTransition {
            rental_id: rental.id,
            from: rental.status,
            to: RentalStatus::Returned,
            reason,
        });
    }
    Ok(())
}

pub fn is_overdue(rental: &Rental, today: NaiveDate) -> bool {
    rental.status == RentalStatus::Active && rental.due_date < today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rental(status: RentalStatus, due: NaiveDate, returned: Option<NaiveDate>) -> Rental {
        Rental {
            id: 1,
            customer_id: 1,
            movie_id: 1,
            employee_id: 1,
            rental_date: date(2024, 3, 1),
            due_date: due,
            return_date: returned,
            charge: Money::from_cents(700),
            late_fee: Money::zero(),
            status,
            returned_by: None,
            customer_name: "Ann Lee".to_string(),
            movie_title: "Alien".to_string(),
            movie_genre: None,
            employee_name: "Admin User".to_string(),
        }
    }

    #[test]
    fn release_year_window_follows_clock() {
        let policy = RentalPolicy::default();
        let range = release_year_range(&policy, date(2024, 6, 1));
        assert_eq!(*range.start(), 1888);
        assert_eq!(*range.end(), 2029);

        let today = date(2024, 6, 1);
        for year in [1888, 1999, 2024, 2029] {
            let draft = MovieDraft::new("Film", Money::from_cents(100), 1).with_release_year(year);
            assert!(validate_movie(&draft, &policy, today).is_ok(), "year {}", year);
        }
        for year in [1887, 2030] {
            let draft = MovieDraft::new("Film", Money::from_cents(100), 1).with_release_year(year);
            assert!(validate_movie(&draft, &policy, today).unwrap_err().is_validation(), "year {}", year);
        }
    }

    #[test]
    fn movie_field_rules() {
        let policy = RentalPolicy::default();
        let today = date(2024, 6, 1);
        assert!(validate_movie(&MovieDraft::new("  ", Money::zero(), 1), &policy, today).is_err());
        assert!(validate_movie(&MovieDraft::new("A", Money::from_cents(-1), 1), &policy, today).is_err());
        assert!(validate_movie(&MovieDraft::new("A", Money::zero(), -1), &policy, today).is_err());
        assert!(validate_movie(&MovieDraft::new("A", Money::zero(), 0).with_duration(0), &policy, today).is_err());
        assert!(validate_movie(&MovieDraft::new("A", Money::zero(), 0), &policy, today).is_ok());
        assert!(validate_movie(&MovieDraft::new("A", MAX_RENTAL_RATE, 1), &policy, today).is_ok());
        let over = Money::from_cents(MAX_RENTAL_RATE.cents() + 1);
        assert!(validate_movie(&MovieDraft::new("A", over, 1), &policy, today).unwrap_err().is_validation());
    }

    #[test]
    fn restock_keeps_rented_copies() {
        assert_eq!(restocked(5, 2).unwrap(), 3);
        assert_eq!(restocked(2, 2).unwrap(), 0);
        assert!(restocked(1, 2).is_err());
    }

    #[test]
    fn customer_rules() {
        assert!(validate_customer(&CustomerDraft::new("Ann", "Lee")).is_ok());
        assert!(validate_customer(&CustomerDraft::new("", "Lee")).is_err());
        assert!(validate_customer(&CustomerDraft::new("Ann", "Lee").with_email("ann@example.com")).is_ok());
        assert!(validate_customer(&CustomerDraft::new("Ann", "Lee").with_email("ann@")).is_err());

        let normalized = normalize_customer(&CustomerDraft::new(" Ann ", "Lee").with_email(" Ann@Example.COM "));
        assert_eq!(normalized.first_name, "Ann");
        assert_eq!(normalized.email.as_deref(), Some("ann@example.com"));
    }

    #[test]
    fn charge_is_rate_times_days() {
        let charge = rental_charge(Money::from_cents(299), date(2024, 3, 1), date(2024, 3, 4)).unwrap();
        assert_eq!(charge, Money::from_cents(897));
        assert!(rental_charge(Money::from_cents(299), date(2024, 3, 1), date(2024, 3, 1)).is_err());
        assert!(rental_charge(Money::from_cents(299), date(2024, 3, 2), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn oversized_charges_are_rejected() {
        let huge = Money::from_cents(i64::MAX / 2);
        let err = rental_charge(huge, date(2024, 3, 1), date(2024, 3, 4)).unwrap_err();
        assert!(err.is_validation());

        let policy = RentalPolicy {
            late_fee_per_day: huge,
            ..RentalPolicy::default()
        };
        assert_eq!(late_fee(&policy, date(2024, 3, 8), date(2024, 3, 8)).unwrap(), Money::zero());
        assert!(late_fee(&policy, date(2024, 3, 8), date(2024, 3, 11)).unwrap_err().is_validation());
    }

    #[test]
    fn late_fee_per_day_late() {
        let policy = RentalPolicy::default();
        assert_eq!(late_fee(&policy, date(2024, 3, 8), date(2024, 3, 8)).unwrap(), Money::zero());
        assert_eq!(late_fee(&policy, date(2024, 3, 8), date(2024, 3, 5)).unwrap(), Money::zero());
        assert_eq!(late_fee(&policy, date(2024, 3, 8), date(2024, 3, 11)).unwrap(), Money::from_cents(600));
    }

    #[test]
    fn return_transitions() {
        let due = date(2024, 3, 8);
        assert!(check_return(&rental(RentalStatus::Active, due, None)).is_ok());
        assert!(check_return(&rental(RentalStatus::Overdue, due, None)).is_ok());
        let err = check_return(&rental(RentalStatus::Returned, due, Some(due))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
        assert!(err.to_string().contains("already returned"));
    }

    #[test]
    fn overdue_only_after_due_date() {
        let due = date(2024, 3, 8);
        assert!(!is_overdue(&rental(RentalStatus::Active, due, None), due));
        assert!(is_overdue(&rental(RentalStatus::Active, due, None), date(2024, 3, 9)));
        assert!(!is_overdue(&rental(RentalStatus::Returned, due, Some(due)), date(2024, 3, 9)));
    }
}
