use crate::libs::employee::{Employee, EmployeeDraft, Role};
use crate::libs::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (username, password_hash, first_name, last_name, email, role) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_EMPLOYEE: &str = "SELECT id, username, password_hash, first_name, last_name, email, role, created_at, is_active FROM employees";
const UPDATE_PASSWORD: &str = "UPDATE employees SET password_hash = ?2 WHERE id = ?1";
const UPDATE_ACTIVE: &str = "UPDATE employees SET is_active = ?2 WHERE id = ?1";
const UPDATE_ROLE: &str = "UPDATE employees SET role = ?2 WHERE id = ?1";
const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?1";
const COUNT_BY_USERNAME: &str = "SELECT COUNT(*) FROM employees WHERE username = ?1";
const COUNT_BY_EMAIL: &str = "SELECT COUNT(*) FROM employees WHERE email = ?1";
const COUNT_HISTORY: &str = "SELECT (SELECT COUNT(*) FROM rentals WHERE employee_id = ?1 OR returned_by = ?1) + (SELECT COUNT(*) FROM returns WHERE processed_by = ?1)";
const COUNT_BY_ROLE: &str = "SELECT COUNT(*) FROM employees WHERE role = ?1 AND is_active = 1";

fn employee_from_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        email: row.get(5)?,
        role: row.get(6)?,
        created_at: row.get(7)?,
        is_active: row.get(8)?,
    })
}

pub struct Employees<'a> {
    conn: &'a Connection,
}

impl<'a> Employees<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Stores a new employee; `password_hash` must already be hashed.
    pub fn insert(&self, draft: &EmployeeDraft, password_hash: &str) -> StoreResult<i64> {
        self.conn.execute(
            INSERT_EMPLOYEE,
            params![draft.username, password_hash, draft.first_name, draft.last_name, draft.email, draft.role],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(employee_id = id, username = %draft.username, role = %draft.role, "employee inserted");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        let sql = format!("{} WHERE id = ?1", SELECT_EMPLOYEE);
        Ok(self.conn.query_row(&sql, params![id], employee_from_row).optional()?)
    }

    pub fn get_by_username(&self, username: &str) -> StoreResult<Option<Employee>> {
        let sql = format!("{} WHERE username = ?1", SELECT_EMPLOYEE);
        Ok(self.conn.query_row(&sql, params![username], employee_from_row).optional()?)
    }

    pub fn list(&self) -> StoreResult<Vec<Employee>> {
        let sql = format!("{} ORDER BY last_name, first_name, id", SELECT_EMPLOYEE);
        let mut stmt = self.conn.prepare(&sql)?;
        let employee_iter = stmt.query_map([], employee_from_row)?;

        let mut employees = Vec::new();
        for employee in employee_iter {
            employees.push(employee?);
        }
        Ok(employees)
    }

    pub fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_PASSWORD, params![id, password_hash])?;
        if affected == 0 {
            return Err(StoreError::not_found("Employee", id));
        }
        tracing::info!(employee_id = id, "employee password changed");
        Ok(())
    }

    pub fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_ACTIVE, params![id, active])?;
        if affected == 0 {
            return Err(StoreError::not_found("Employee", id));
        }
        tracing::info!(employee_id = id, active, "employee activation changed");
        Ok(())
    }

    pub fn set_role(&self, id: i64, role: Role) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_ROLE, params![id, role])?;
        if affected == 0 {
            return Err(StoreError::not_found("Employee", id));
        }
        tracing::info!(employee_id = id, role = %role, "employee role changed");
        Ok(())
    }

    /// Hard delete. Fails with a foreign-key error once the employee has
    /// processed rentals or returns.
    /// Rentals issued or returned by the employee, plus processed returns.
    pub fn history_count(&self, id: i64) -> StoreResult<i64> {
        Ok(self.conn.query_row(COUNT_HISTORY, params![id], |row| row.get(0))?)
    }

    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let affected = self.conn.execute(DELETE_EMPLOYEE, params![id])?;
        if affected == 0 {
            return Err(StoreError::not_found("Employee", id));
        }
        tracing::info!(employee_id = id, "employee deleted");
        Ok(())
    }

    pub fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let count: i64 = self.conn.query_row(COUNT_BY_USERNAME, params![username], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let count: i64 = self.conn.query_row(COUNT_BY_EMAIL, params![email], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn count_active_with_role(&self, role: Role) -> StoreResult<i64> {
        Ok(self.conn.query_row(COUNT_BY_ROLE, params![role], |row| row.get(0))?)
    }
}
