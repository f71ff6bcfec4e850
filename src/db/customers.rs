use crate::db::movies::like_pattern;
use crate::db::rentals::{rental_from_row, SELECT_RENTAL_DETAIL};
use crate::libs::customer::{Customer, CustomerDraft};
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::rental::Rental;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const INSERT_CUSTOMER: &str = "INSERT INTO customers (first_name, last_name, email, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_CUSTOMER: &str = "SELECT id, first_name, last_name, email, phone, address, date_registered, is_active FROM customers";
const UPDATE_CUSTOMER: &str = "UPDATE customers SET first_name = ?2, last_name = ?3, email = ?4, phone = ?5, address = ?6 WHERE id = ?1";
const UPDATE_ACTIVE: &str = "UPDATE customers SET is_active = ?2 WHERE id = ?1";
const COUNT_BY_EMAIL: &str = "SELECT COUNT(*) FROM customers WHERE email = ?1 AND id != ?2";
const COUNT_OPEN_RENTALS: &str = "SELECT COUNT(*) FROM rentals WHERE customer_id = ?1 AND return_date IS NULL";

fn customer_from_row(row: &Row) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        registered_at: row.get(6)?,
        is_active: row.get(7)?,
    })
}

pub struct Customers<'a> {
    conn: &'a Connection,
}

impl<'a> Customers<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, draft: &CustomerDraft) -> StoreResult<i64> {
        self.conn.execute(
            INSERT_CUSTOMER,
            params![draft.first_name, draft.last_name, draft.email, draft.phone, draft.address],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(customer_id = id, "customer inserted");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Customer>> {
        let sql = format!("{} WHERE id = ?1", SELECT_CUSTOMER);
        Ok(self.conn.query_row(&sql, params![id], customer_from_row).optional()?)
    }

    /// A numeric term matches the customer id; anything else matches first or
    /// last name. An empty term lists everyone.
    pub fn search(&self, term: &str, include_inactive: bool) -> StoreResult<Vec<Customer>> {
        let term = term.trim();
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Ok(id) = term.parse::<i64>() {
            clauses.push("id = ?");
            values.push(Value::Integer(id));
        } else if !term.is_empty() {
            clauses.push(
                "(first_name LIKE ?1 ESCAPE '\\' OR last_name LIKE ?1 ESCAPE '\\' OR (first_name || ' ' || last_name) LIKE ?1 ESCAPE '\\')",
            );
            values.push(Value::Text(like_pattern(term)));
        }
        if !include_inactive {
            clauses.push("is_active = 1");
        }

        let mut sql = SELECT_CUSTOMER.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY last_name, first_name, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let customer_iter = stmt.query_map(params_from_iter(values.iter()), customer_from_row)?;

        let mut customers = Vec::new();
        for customer in customer_iter {
            customers.push(customer?);
        }
        Ok(customers)
    }

    pub fn update(&self, id: i64, draft: &CustomerDraft) -> StoreResult<()> {
        let affected = self.conn.execute(
            UPDATE_CUSTOMER,
            params![id, draft.first_name, draft.last_name, draft.email, draft.phone, draft.address],
        )?;
        if affected == 0 {
            return Err(StoreError::not_found("Customer", id));
        }
        tracing::info!(customer_id = id, "customer updated");
        Ok(())
    }

    pub fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_ACTIVE, params![id, active])?;
        if affected == 0 {
            return Err(StoreError::not_found("Customer", id));
        }
        tracing::info!(customer_id = id, active, "customer activation changed");
        Ok(())
    }

    /// Whether another customer already uses `email`.
    pub fn email_exists(&self, email: &str, excluding: Option<i64>) -> StoreResult<bool> {
        let count: i64 = self
            .conn
            .query_row(COUNT_BY_EMAIL, params![email, excluding.unwrap_or(0)], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn open_rental_count(&self, id: i64) -> StoreResult<i64> {
        Ok(self.conn.query_row(COUNT_OPEN_RENTALS, params![id], |row| row.get(0))?)
    }

    /// Every rental of the customer, newest first.
    pub fn rental_history(&self, id: i64) -> StoreResult<Vec<Rental>> {
        let sql = format!("{} WHERE r.customer_id = ?1 ORDER BY r.rental_date DESC, r.id DESC", SELECT_RENTAL_DETAIL);
        let mut stmt = self.conn.prepare(&sql)?;
        let rentals = stmt.query_map(params![id], rental_from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(rentals)
    }
}
