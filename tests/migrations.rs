#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use videostore::db::db::Db;
    use videostore::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use videostore::libs::config::DatabaseConfig;

    struct MigrationTestContext {
        _temp_dir: TempDir,
        config: DatabaseConfig,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = DatabaseConfig::at(temp_dir.path().join("data").join("test.db"));
            MigrationTestContext {
                _temp_dir: temp_dir,
                config,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::open_without_migrations(&ctx.config).unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
        assert!(MigrationManager::new().get_migration_history(&conn).unwrap().is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_open_applies_all_migrations(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.config).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&db.conn).unwrap(), manager.latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
        assert!(manager.is_migration_applied(&db.conn, 1).unwrap());

        let history = manager.get_migration_history(&db.conn).unwrap();
        let names: Vec<&str> = history.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["create_core_tables", "add_returns_log", "add_lookup_indices"]);

        for table in ["employees", "movies", "customers", "rentals", "returns"] {
            let count: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1", [table], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reopening_is_idempotent(ctx: &mut MigrationTestContext) {
        drop(Db::open(&ctx.config).unwrap());
        let db = Db::open(&ctx.config).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        assert_eq!(history.len(), 3);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_foreign_keys_are_enforced(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.config).unwrap();
        let enabled: i64 = db.conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(enabled, 1);

        let orphan = db.conn.execute(
            "INSERT INTO rentals (customer_id, movie_id, employee_id, rental_date, due_date, charge, status)
             VALUES (1, 1, 1, '2024-03-01', '2024-03-02', 100, 'active')",
            [],
        );
        assert!(orphan.is_err());
    }

    #[test]
    fn test_in_memory_database() {
        let db = Db::in_memory().unwrap();
        assert!(db.path.is_none());
        assert!(!needs_migration(&db.conn).unwrap());
    }
}
