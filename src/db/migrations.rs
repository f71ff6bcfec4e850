//! Versioned schema migrations.
//!
//! Each migration is a numbered function applied inside one transaction
//! together with every other pending migration. Applied versions are recorded
//! in the `migrations` table, so running the manager twice is a no-op.
//!
//! ```rust,no_run
//! use videostore::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("videostore.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), videostore::libs::error::StoreError>(())
//! ```

use crate::libs::error::StoreResult;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE COLLATE NOCASE,
    role TEXT NOT NULL DEFAULT 'staff' CHECK (role IN ('admin', 'manager', 'staff')),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    is_active BOOLEAN NOT NULL DEFAULT 1
)";

// Release year bounds depend on today's date and are enforced by the store.
const SCHEMA_MOVIES: &str = "CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    director TEXT,
    genre TEXT,
    release_year INTEGER,
    duration INTEGER CHECK (duration IS NULL OR duration > 0),
    description TEXT,
    rental_rate INTEGER NOT NULL DEFAULT 0 CHECK (rental_rate >= 0),
    stock_quantity INTEGER NOT NULL DEFAULT 0 CHECK (stock_quantity >= 0),
    total_copies INTEGER NOT NULL DEFAULT 0 CHECK (total_copies >= 0),
    is_available BOOLEAN NOT NULL DEFAULT 1,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_CUSTOMERS: &str = "CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT UNIQUE COLLATE NOCASE,
    phone TEXT,
    address TEXT,
    date_registered TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    is_active BOOLEAN NOT NULL DEFAULT 1
)";

const SCHEMA_RENTALS: &str = "CREATE TABLE IF NOT EXISTS rentals (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    movie_id INTEGER NOT NULL REFERENCES movies(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    rental_date DATE NOT NULL,
    due_date DATE NOT NULL,
    return_date DATE,
    charge INTEGER NOT NULL DEFAULT 0,
    late_fee INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'returned', 'overdue')),
    returned_by INTEGER REFERENCES employees(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    CHECK (due_date > rental_date)
)";

const SCHEMA_RETURNS: &str = "CREATE TABLE IF NOT EXISTS returns (
    id INTEGER PRIMARY KEY,
    rental_id INTEGER NOT NULL UNIQUE REFERENCES rentals(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    return_date DATE NOT NULL,
    late_days INTEGER NOT NULL DEFAULT 0,
    late_fee INTEGER NOT NULL DEFAULT 0,
    total_paid INTEGER NOT NULL,
    processed_by INTEGER NOT NULL REFERENCES employees(id) ON DELETE RESTRICT ON UPDATE CASCADE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of all schema migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_core_tables", |tx| {
            tx.execute(SCHEMA_EMPLOYEES, [])?;
            tx.execute(SCHEMA_MOVIES, [])?;
            tx.execute(SCHEMA_CUSTOMERS, [])?;
            tx.execute(SCHEMA_RENTALS, [])?;
            Ok(())
        });

        // Per-return audit log: who processed it and what was paid.
        self.add_migration(2, "add_returns_log", |tx| {
            tx.execute(SCHEMA_RETURNS, [])?;
            Ok(())
        });

        self.add_migration(3, "add_lookup_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_movies_title ON movies(title)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_movies_genre ON movies(genre)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_movies_availability ON movies(is_available)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_customers_name ON customers(last_name, first_name)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_customer ON rentals(customer_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_movie ON rentals(movie_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_employee ON rentals(employee_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_status ON rentals(status)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_rentals_dates ON rentals(rental_date, due_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_returns_date ON returns(return_date)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration in a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> StoreResult<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e.into());
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    pub fn get_current_version(&self, conn: &Connection) -> StoreResult<u32> {
        let exists: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Ok(0);
        }

        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> StoreResult<bool> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// `(version, name, applied_at)` for each applied migration.
    pub fn get_migration_history(&self, conn: &Connection) -> StoreResult<Vec<(u32, String, String)>> {
        if self.get_current_version(conn)? == 0 {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> StoreResult<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> StoreResult<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> StoreResult<bool> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
