use crate::libs::money::Money;
use crate::libs::rules;
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rental lifecycle: `Active -> Returned`, `Active -> Overdue -> Returned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Returned,
    Overdue,
}

impl RentalStatus {
    pub const ALL: [RentalStatus; 3] = [RentalStatus::Active, RentalStatus::Overdue, RentalStatus::Returned];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Returned => "returned",
            RentalStatus::Overdue => "overdue",
        }
    }

    /// The copy is still out of the store.
    pub fn is_open(&self) -> bool {
        !matches!(self, RentalStatus::Returned)
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(RentalStatus::Active),
            "returned" => Ok(RentalStatus::Returned),
            "overdue" => Ok(RentalStatus::Overdue),
            other => Err(format!("Unknown rental status '{}'", other)),
        }
    }
}

impl ToSql for RentalStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RentalStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A rental joined with the names needed to display it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i64,
    pub customer_id: i64,
    pub movie_id: i64,
    pub employee_id: i64,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub charge: Money,
    pub late_fee: Money,
    pub status: RentalStatus,
    pub returned_by: Option<i64>,
    pub customer_name: String,
    pub movie_title: String,
    pub movie_genre: Option<String>,
    pub employee_name: String,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn revenue(&self) -> Money {
        self.charge + self.late_fee
    }

    /// Status as of `today`: an active rental past its due date reads as
    /// overdue even before the stored status is refreshed.
    pub fn status_on(&self, today: NaiveDate) -> RentalStatus {
        if rules::is_overdue(self, today) {
            RentalStatus::Overdue
        } else {
            self.status
        }
    }

    /// Days past the due date as of `today`, or at return time once returned.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        let reference = self.return_date.unwrap_or(today);
        (reference - self.due_date).num_days().max(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRental {
    pub customer_id: i64,
    pub movie_id: i64,
    pub employee_id: i64,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub charge: Money,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalFilter {
    pub customer_id: Option<i64>,
    pub movie_id: Option<i64>,
    pub status: Option<RentalStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RentalFilter {
    pub fn status(status: RentalStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn customer(customer_id: i64) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }
}

/// Outcome of a return, also kept in the `returns` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub rental_id: i64,
    pub movie_title: String,
    pub return_date: NaiveDate,
    pub late_days: i64,
    pub late_fee: Money,
    pub total_paid: Money,
    pub processed_by: i64,
}
