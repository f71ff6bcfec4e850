//! The store service: every operation the dashboard performs.
//!
//! `Store` owns the database connection, the rental policy and a [`Clock`].
//! It validates input with [`crate::libs::rules`] before calling the
//! repositories, and wraps every mutation that touches more than one table
//! (issuing a rental, returning it, changing copy counts) in a transaction.
//!
//! ```rust,no_run
//! use videostore::libs::config::Config;
//! use videostore::libs::store::Store;
//!
//! let mut store = Store::open(&Config::load()?)?;
//! let admin = store.authenticate("admin", "admin123")?;
//! let overdue = store.overdue_rentals()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::customers::Customers;
use crate::db::db::Db;
use crate::db::employees::Employees;
use crate::db::movies::Movies;
use crate::db::rentals::Rentals;
use crate::libs::config::{Config, RentalPolicy, ReportConfig};
use crate::libs::customer::{Customer, CustomerDraft};
use crate::libs::employee::{Employee, EmployeeDraft, Role};
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::movie::{Movie, MovieDraft, MovieFilter};
use crate::libs::rental::{NewRental, Rental, RentalFilter, ReturnReceipt};
use crate::libs::report::RentalReport;
use crate::libs::rules::{self, Clock};
use crate::libs::sample::{self, SeedSummary};
use crate::libs::security;
use chrono::NaiveDate;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_ADMIN_EMAIL: &str = "admin@videostore.local";

pub struct Store {
    db: Db,
    policy: RentalPolicy,
    clock: Clock,
    reports: ReportConfig,
}

impl Store {
    pub fn open(config: &Config) -> StoreResult<Self> {
        Self::open_with_clock(config, Clock::System)
    }

    pub fn open_with_clock(config: &Config, clock: Clock) -> StoreResult<Self> {
        let db = Db::open(&config.database)?;
        Ok(Self::with_db(db, config, clock))
    }

    pub fn with_db(db: Db, config: &Config, clock: Clock) -> Self {
        Self {
            db,
            policy: config.rentals.clone(),
            clock,
            reports: config.reports.clone(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    pub fn policy(&self) -> &RentalPolicy {
        &self.policy
    }

    pub fn reports(&self) -> &ReportConfig {
        &self.reports
    }

    // === AUTHENTICATION ===

    /// Returns the employee when the password matches an active account.
    /// Unknown users, wrong passwords and inactive accounts all fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<Employee> {
        let denied = || StoreError::Unauthorized("Invalid username or password".to_string());

        let employee = Employees::new(&self.db.conn).get_by_username(username.trim())?.ok_or_else(denied)?;
        if !security::verify_password(password, &employee.password_hash) {
            tracing::warn!(username = %username, "login rejected");
            return Err(denied());
        }
        if !employee.is_active {
            tracing::warn!(username = %username, "login for inactive account");
            return Err(StoreError::Unauthorized(format!("Account '{}' is deactivated", employee.username)));
        }

        tracing::info!(employee_id = employee.id, "employee logged in");
        Ok(employee)
    }

    /// Creates `admin`/`admin123` unless an administrator already exists.
    pub fn create_default_admin(&mut self) -> StoreResult<bool> {
        let employees = Employees::new(&self.db.conn);
        if employees.count_active_with_role(Role::Admin)? > 0 || employees.username_exists(DEFAULT_ADMIN_USERNAME)? {
            return Ok(false);
        }

        let draft = EmployeeDraft::new(
            DEFAULT_ADMIN_USERNAME,
            DEFAULT_ADMIN_PASSWORD,
            "System",
            "Administrator",
            DEFAULT_ADMIN_EMAIL,
            Role::Admin,
        );
        let hash = security::hash_password(&draft.password)?;
        employees.insert(&draft, &hash)?;
        Ok(true)
    }

    pub fn change_password(&mut self, employee_id: i64, current: &str, new_password: &str) -> StoreResult<()> {
        let employees = Employees::new(&self.db.conn);
        let employee = employees
            .get_by_id(employee_id)?
            .ok_or_else(|| StoreError::not_found("Employee", employee_id))?;
        if !security::verify_password(current, &employee.password_hash) {
            return Err(StoreError::Unauthorized("Current password is incorrect".to_string()));
        }
        security::validate_password_strength(new_password)?;

        let hash = security::hash_password(new_password)?;
        employees.update_password(employee_id, &hash)
    }

    // === EMPLOYEES ===

    fn require_admin(actor: &Employee) -> StoreResult<()> {
        if !actor.role.can_manage_employees() {
            return Err(StoreError::Unauthorized(format!(
                "'{}' ({}) cannot manage employees",
                actor.username, actor.role
            )));
        }
        Ok(())
    }

    pub fn register_employee(&mut self, actor: &Employee, draft: &EmployeeDraft) -> StoreResult<Employee> {
        Self::require_admin(actor)?;

        let draft = EmployeeDraft {
            username: draft.username.trim().to_string(),
            first_name: draft.first_name.trim().to_string(),
            last_name: draft.last_name.trim().to_string(),
            email: draft.email.trim().to_lowercase(),
            ..draft.clone()
        };
        rules::validate_employee(&draft)?;

        let employees = Employees::new(&self.db.conn);
        if employees.username_exists(&draft.username)? {
            return Err(StoreError::Duplicate {
                entity: "Employee",
                identifier: draft.username,
            });
        }
        if employees.email_exists(&draft.email)? {
            return Err(StoreError::Duplicate {
                entity: "Employee",
                identifier: draft.email,
            });
        }

        let hash = security::hash_password(&draft.password)?;
        let id = employees.insert(&draft, &hash)?;
        self.get_employee(id)
    }

    pub fn get_employee(&self, id: i64) -> StoreResult<Employee> {
        Employees::new(&self.db.conn)
            .get_by_id(id)?
            .ok_or_else(|| StoreError::not_found("Employee", id))
    }

    pub fn list_employees(&self, actor: &Employee) -> StoreResult<Vec<Employee>> {
        Self::require_admin(actor)?;
        Employees::new(&self.db.conn).list()
    }

    pub fn set_employee_active(&mut self, actor: &Employee, id: i64, active: bool) -> StoreResult<()> {
        Self::require_admin(actor)?;
        if actor.id == id && !active {
            return Err(StoreError::validation("You cannot deactivate your own account"));
        }
        Employees::new(&self.db.conn).set_active(id, active)
    }

    pub fn set_employee_role(&mut self, actor: &Employee, id: i64, role: Role) -> StoreResult<()> {
        Self::require_admin(actor)?;
        if actor.id == id && role != Role::Admin {
            return Err(StoreError::validation("You cannot remove your own administrator role"));
        }
        Employees::new(&self.db.conn).set_role(id, role)
    }

    /// Permanently removes an employee. Employees with rental history are
    /// protected by the database and should be deactivated instead.
    pub fn delete_employee(&mut self, actor: &Employee, id: i64) -> StoreResult<()> {
        Self::require_admin(actor)?;
        if actor.id == id {
            return Err(StoreError::validation("You cannot delete your own account"));
        }
        let in_history = || StoreError::ForeignKey(format!("employee #{} has processed rentals; deactivate the account instead", id));
        let employees = Employees::new(&self.db.conn);
        if employees.history_count(id)? > 0 {
            return Err(in_history());
        }
        employees.delete(id).map_err(|e| match e {
            StoreError::ForeignKey(_) => in_history(),
            other => other,
        })
    }

    // === MOVIES ===

    pub fn add_movie(&mut self, draft: &MovieDraft) -> StoreResult<Movie> {
        let draft = rules::normalize_movie(draft);
        rules::validate_movie(&draft, &self.policy, self.today())?;

        let id = Movies::new(&self.db.conn).insert(&draft)?;
        self.get_movie(id)
    }

    /// Updates a movie. Stock follows the new copy count minus the copies
    /// currently rented out.
    pub fn update_movie(&mut self, id: i64, draft: &MovieDraft) -> StoreResult<Movie> {
        let draft = rules::normalize_movie(draft);
        rules::validate_movie(&draft, &self.policy, self.today())?;

        let tx = self.db.conn.transaction()?;
        {
            let movies = Movies::new(&tx);
            if movies.get_by_id(id)?.is_none() {
                return Err(StoreError::not_found("Movie", id));
            }
            let stock = rules::restocked(draft.total_copies, movies.open_rental_count(id)?)?;
            movies.update(id, &draft, stock)?;
        }
        tx.commit()?;

        self.get_movie(id)
    }

    /// Retires a movie from the catalogue. Rejected while copies are rented.
    pub fn delete_movie(&mut self, id: i64) -> StoreResult<()> {
        let movies = Movies::new(&self.db.conn);
        if movies.get_by_id(id)?.is_none() {
            return Err(StoreError::not_found("Movie", id));
        }
        let open = movies.open_rental_count(id)?;
        if open > 0 {
            return Err(StoreError::InUse { entity: "movie", id, open });
        }
        movies.set_active(id, false)
    }

    pub fn get_movie(&self, id: i64) -> StoreResult<Movie> {
        Movies::new(&self.db.conn)
            .get_by_id(id)?
            .ok_or_else(|| StoreError::not_found("Movie", id))
    }

    pub fn search_movies(&self, filter: &MovieFilter) -> StoreResult<Vec<Movie>> {
        if let (Some(min), Some(max)) = (filter.min_rate, filter.max_rate) {
            if min > max {
                return Err(StoreError::validation(format!("Price range {} .. {} is empty", min, max)));
            }
        }
        Movies::new(&self.db.conn).search(filter)
    }

    pub fn genres(&self) -> StoreResult<Vec<String>> {
        Movies::new(&self.db.conn).genres()
    }

    // === CUSTOMERS ===

    pub fn add_customer(&mut self, draft: &CustomerDraft) -> StoreResult<Customer> {
        let draft = rules::normalize_customer(draft);
        rules::validate_customer(&draft)?;

        let customers = Customers::new(&self.db.conn);
        if let Some(email) = &draft.email {
            if customers.email_exists(email, None)? {
                return Err(StoreError::Duplicate {
                    entity: "Customer",
                    identifier: email.clone(),
                });
            }
        }
        let id = customers.insert(&draft)?;
        self.get_customer(id)
    }

    pub fn update_customer(&mut self, id: i64, draft: &CustomerDraft) -> StoreResult<Customer> {
        let draft = rules::normalize_customer(draft);
        rules::validate_customer(&draft)?;

        let customers = Customers::new(&self.db.conn);
        if let Some(email) = &draft.email {
            if customers.email_exists(email, Some(id))? {
                return Err(StoreError::Duplicate {
                    entity: "Customer",
                    identifier: email.clone(),
                });
            }
        }
        customers.update(id, &draft)?;
        self.get_customer(id)
    }

    /// Deactivates a customer. Rejected while they have rentals out.
    pub fn delete_customer(&mut self, id: i64) -> StoreResult<()> {
        let customers = Customers::new(&self.db.conn);
        if customers.get_by_id(id)?.is_none() {
            return Err(StoreError::not_found("Customer", id));
        }
        let open = customers.open_rental_count(id)?;
        if open > 0 {
            return Err(StoreError::InUse {
                entity: "customer",
                id,
                open,
            });
        }
        customers.set_active(id, false)
    }

    pub fn get_customer(&self, id: i64) -> StoreResult<Customer> {
        Customers::new(&self.db.conn)
            .get_by_id(id)?
            .ok_or_else(|| StoreError::not_found("Customer", id))
    }

    pub fn search_customers(&self, term: &str, include_inactive: bool) -> StoreResult<Vec<Customer>> {
        Customers::new(&self.db.conn).search(term, include_inactive)
    }

    pub fn customer_history(&self, id: i64) -> StoreResult<Vec<Rental>> {
        self.get_customer(id)?;
        Customers::new(&self.db.conn).rental_history(id)
    }

    /// Adds the demo movies and customers that are not already present.
    /// Movies match on title, customers on email.
    pub fn seed_sample_data(&mut self) -> StoreResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        let existing: Vec<String> = Movies::new(&self.db.conn)
            .search(&MovieFilter {
                include_retired: true,
                ..MovieFilter::default()
            })?
            .into_iter()
            .map(|m| m.title.to_lowercase())
            .collect();
        for draft in sample::movies() {
            if !existing.contains(&draft.title.to_lowercase()) {
                self.add_movie(&draft)?;
                summary.movies += 1;
            }
        }

        for draft in sample::customers() {
            let taken = match &draft.email {
                Some(email) => Customers::new(&self.db.conn).email_exists(email, None)?,
                None => false,
            };
            if !taken {
                self.add_customer(&draft)?;
                summary.customers += 1;
            }
        }

        tracing::info!(movies = summary.movies, customers = summary.customers, "sample data seeded");
        Ok(summary)
    }

    // === RENTALS ===

    /// Issues one copy of a movie to a customer, dated today. Without a due
    /// date the default rental period applies.
    pub fn rent_movie(&mut self, employee: &Employee, customer_id: i64, movie_id: i64, due_date: Option<NaiveDate>) -> StoreResult<Rental> {
        let today = self.today();
        let due_date = due_date.unwrap_or_else(|| rules::default_due_date(&self.policy, today));

        let tx = self.db.conn.transaction()?;
        let rental_id = {
            let customer = Customers::new(&tx)
                .get_by_id(customer_id)?
                .ok_or_else(|| StoreError::not_found("Customer", customer_id))?;
            if !customer.is_active {
                return Err(StoreError::validation(format!("Customer '{}' is inactive", customer.full_name())));
            }

            let movies = Movies::new(&tx);
            let movie = movies.get_by_id(movie_id)?.ok_or_else(|| StoreError::not_found("Movie", movie_id))?;
            if !movie.is_active {
                return Err(StoreError::validation(format!("'{}' has been retired from the catalogue", movie.title)));
            }
            if movie.stock <= 0 {
                return Err(StoreError::OutOfStock { title: movie.title });
            }

            let charge = rules::rental_charge(movie.rental_rate, today, due_date)?;
            let rental_id = Rentals::new(&tx).insert(&NewRental {
                customer_id,
                movie_id,
                employee_id: employee.id,
                rental_date: today,
                due_date,
                charge,
            })?;
            movies.adjust_stock(movie_id, -1)?;
            rental_id
        };
        tx.commit()?;

        self.get_rental(rental_id)
    }

    /// Checks a copy back in, dated today, charging the late fee if any.
    pub fn return_rental(&mut self, employee: &Employee, rental_id: i64) -> StoreResult<ReturnReceipt> {
        let today = self.today();

        let tx = self.db.conn.transaction()?;
        let receipt = {
            let rentals = Rentals::new(&tx);
            let rental = rentals.get_by_id(rental_id)?.ok_or_else(|| StoreError::not_found("Rental", rental_id))?;
            rules::check_return(&rental)?;

            let late_days = rules::late_days(rental.due_date, today);
            let late_fee = rules::late_fee(&self.policy, rental.due_date, today)?;
            let total_paid = rental
                .charge
                .checked_add(late_fee)
                .ok_or_else(|| StoreError::validation(format!("Total for rental #{} is too large", rental_id)))?;
            rentals.mark_returned(rental_id, today, late_fee, employee.id)?;
            Movies::new(&tx).adjust_stock(rental.movie_id, 1)?;

            let receipt = ReturnReceipt {
                rental_id,
                movie_title: rental.movie_title,
                return_date: today,
                late_days,
                late_fee,
                total_paid,
                processed_by: employee.id,
            };
            rentals.insert_return(&receipt)?;
            receipt
        };
        tx.commit()?;

        Ok(receipt)
    }

    /// Marks active rentals past their due date as overdue.
    pub fn refresh_overdue(&mut self) -> StoreResult<usize> {
        Rentals::new(&self.db.conn).mark_overdue(self.today())
    }

    pub fn get_rental(&self, id: i64) -> StoreResult<Rental> {
        Rentals::new(&self.db.conn)
            .get_by_id(id)?
            .ok_or_else(|| StoreError::not_found("Rental", id))
    }

    pub fn get_return(&self, rental_id: i64) -> StoreResult<Option<ReturnReceipt>> {
        Rentals::new(&self.db.conn).get_return(rental_id)
    }

    pub fn search_rentals(&self, filter: &RentalFilter) -> StoreResult<Vec<Rental>> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(StoreError::validation(format!("Date range {} .. {} is empty", from, to)));
            }
        }
        Rentals::new(&self.db.conn).search(filter)
    }

    pub fn current_rentals(&self) -> StoreResult<Vec<Rental>> {
        Rentals::new(&self.db.conn).open()
    }

    pub fn overdue_rentals(&self) -> StoreResult<Vec<Rental>> {
        Rentals::new(&self.db.conn).overdue(self.today())
    }

    // === REPORTS ===

    /// Rental and revenue report for rentals issued within `[from, to]`.
    pub fn report(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<RentalReport> {
        if from > to {
            return Err(StoreError::validation(format!("Date range {} .. {} is empty", from, to)));
        }
        let records = Rentals::new(&self.db.conn).in_range(from, to)?;
        Ok(RentalReport::build(from, to, records, self.reports.top_movies))
    }
}
