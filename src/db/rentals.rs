use crate::libs::error::{StoreError, StoreResult};
use crate::libs::money::Money;
use crate::libs::rental::{NewRental, Rental, RentalFilter, ReturnReceipt};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INSERT_RENTAL: &str = "INSERT INTO rentals (customer_id, movie_id, employee_id, rental_date, due_date, charge, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active')";
pub(crate) const SELECT_RENTAL_DETAIL: &str = "SELECT r.id, r.customer_id, r.movie_id, r.employee_id, r.rental_date, r.due_date,
        r.return_date, r.charge, r.late_fee, r.status, r.returned_by,
        c.first_name || ' ' || c.last_name, m.title, m.genre, e.first_name || ' ' || e.last_name
    FROM rentals r
    JOIN customers c ON c.id = r.customer_id
    JOIN movies m ON m.id = r.movie_id
    JOIN employees e ON e.id = r.employee_id";
const MARK_RETURNED: &str = "UPDATE rentals SET return_date = ?2, late_fee = ?3, status = 'returned', returned_by = ?4
    WHERE id = ?1 AND return_date IS NULL";
const MARK_OVERDUE: &str = "UPDATE rentals SET status = 'overdue' WHERE status = 'active' AND return_date IS NULL AND due_date < ?1";
const INSERT_RETURN: &str = "INSERT INTO returns (rental_id, return_date, late_days, late_fee, total_paid, processed_by)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_RETURN: &str = "SELECT rt.rental_id, m.title, rt.return_date, rt.late_days, rt.late_fee, rt.total_paid, rt.processed_by
    FROM returns rt
    JOIN rentals r ON r.id = rt.rental_id
    JOIN movies m ON m.id = r.movie_id
    WHERE rt.rental_id = ?1";

pub(crate) fn rental_from_row(row: &Row) -> rusqlite::Result<Rental> {
    Ok(Rental {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        movie_id: row.get(2)?,
        employee_id: row.get(3)?,
        rental_date: row.get(4)?,
        due_date: row.get(5)?,
        return_date: row.get(6)?,
        charge: row.get(7)?,
        late_fee: row.get(8)?,
        status: row.get(9)?,
        returned_by: row.get(10)?,
        customer_name: row.get(11)?,
        movie_title: row.get(12)?,
        movie_genre: row.get(13)?,
        employee_name: row.get(14)?,
    })
}

pub struct Rentals<'a> {
    conn: &'a Connection,
}

impl<'a> Rentals<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, rental: &NewRental) -> StoreResult<i64> {
        self.conn.execute(
            INSERT_RENTAL,
            params![
                rental.customer_id,
                rental.movie_id,
                rental.employee_id,
                rental.rental_date,
                rental.due_date,
                rental.charge
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            rental_id = id,
            customer_id = rental.customer_id,
            movie_id = rental.movie_id,
            due = %rental.due_date,
            "rental inserted"
        );
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Rental>> {
        let sql = format!("{} WHERE r.id = ?1", SELECT_RENTAL_DETAIL);
        Ok(self.conn.query_row(&sql, params![id], rental_from_row).optional()?)
    }

    pub fn search(&self, filter: &RentalFilter) -> StoreResult<Vec<Rental>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(customer_id) = filter.customer_id {
            clauses.push("r.customer_id = ?");
            values.push(Value::Integer(customer_id));
        }
        if let Some(movie_id) = filter.movie_id {
            clauses.push("r.movie_id = ?");
            values.push(Value::Integer(movie_id));
        }
        if let Some(status) = filter.status {
            clauses.push("r.status = ?");
            values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(from) = filter.from {
            clauses.push("r.rental_date >= ?");
            values.push(Value::Text(from.to_string()));
        }
        if let Some(to) = filter.to {
            clauses.push("r.rental_date <= ?");
            values.push(Value::Text(to.to_string()));
        }

        let mut sql = SELECT_RENTAL_DETAIL.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY r.rental_date DESC, r.id DESC");

        self.query(&sql, params_from_iter(values.iter()))
    }

    /// Copies not yet returned, soonest due first.
    pub fn open(&self) -> StoreResult<Vec<Rental>> {
        let sql = format!("{} WHERE r.return_date IS NULL ORDER BY r.due_date, r.id", SELECT_RENTAL_DETAIL);
        self.query(&sql, params![])
    }

    /// Unreturned rentals whose due date is before `today`.
    pub fn overdue(&self, today: NaiveDate) -> StoreResult<Vec<Rental>> {
        let sql = format!(
            "{} WHERE r.return_date IS NULL AND r.due_date < ?1 ORDER BY r.due_date, r.id",
            SELECT_RENTAL_DETAIL
        );
        self.query(&sql, params![today])
    }

    /// Rentals issued within `[from, to]`, oldest first.
    pub fn in_range(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Rental>> {
        let sql = format!(
            "{} WHERE r.rental_date BETWEEN ?1 AND ?2 ORDER BY r.rental_date, r.id",
            SELECT_RENTAL_DETAIL
        );
        self.query(&sql, params![from, to])
    }

    pub fn mark_returned(&self, id: i64, return_date: NaiveDate, late_fee: Money, returned_by: i64) -> StoreResult<()> {
        let affected = self.conn.execute(MARK_RETURNED, params![id, return_date, late_fee, returned_by])?;
        if affected == 0 {
            return Err(StoreError::not_found("Open rental", id));
        }
        tracing::info!(rental_id = id, returned = %return_date, late_fee = %late_fee, "rental returned");
        Ok(())
    }

    /// Flags every active rental due before `today`; returns how many changed.
    pub fn mark_overdue(&self, today: NaiveDate) -> StoreResult<usize> {
        let changed = self.conn.execute(MARK_OVERDUE, params![today])?;
        if changed > 0 {
            tracing::info!(count = changed, as_of = %today, "rentals marked overdue");
        }
        Ok(changed)
    }

    pub fn insert_return(&self, receipt: &ReturnReceipt) -> StoreResult<()> {
        self.conn.execute(
            INSERT_RETURN,
            params![
                receipt.rental_id,
                receipt.return_date,
                receipt.late_days,
                receipt.late_fee,
                receipt.total_paid,
                receipt.processed_by
            ],
        )?;
        Ok(())
    }

    pub fn get_return(&self, rental_id: i64) -> StoreResult<Option<ReturnReceipt>> {
        let receipt = self
            .conn
            .query_row(SELECT_RETURN, params![rental_id], |row| {
                Ok(ReturnReceipt {
                    rental_id: row.get(0)?,
                    movie_title: row.get(1)?,
                    return_date: row.get(2)?,
                    late_days: row.get(3)?,
                    late_fee: row.get(4)?,
                    total_paid: row.get(5)?,
                    processed_by: row.get(6)?,
                })
            })
            .optional()?;
        Ok(receipt)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Rental>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rental_iter = stmt.query_map(params, rental_from_row)?;

        let mut rentals = Vec::new();
        for rental in rental_iter {
            rentals.push(rental?);
        }
        Ok(rentals)
    }
}
