#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use videostore::libs::config::{Config, DatabaseConfig};
    use videostore::libs::customer::CustomerDraft;
    use videostore::libs::employee::Employee;
    use videostore::libs::error::StoreError;
    use videostore::libs::money::Money;
    use videostore::libs::movie::MovieDraft;
    use videostore::libs::rules::Clock;
    use videostore::libs::store::{Store, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

    struct CustomerTestContext {
        _temp_dir: TempDir,
        store: Store,
        admin: Employee,
    }

    impl TestContext for CustomerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                database: DatabaseConfig::at(temp_dir.path().join("test.db")),
                ..Config::default()
            };
            let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            let mut store = Store::open_with_clock(&config, Clock::Fixed(today)).unwrap();
            store.create_default_admin().unwrap();
            let admin = store.authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();

            CustomerTestContext {
                _temp_dir: temp_dir,
                store,
                admin,
            }
        }
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_add_customer_normalizes_fields(ctx: &mut CustomerTestContext) {
        let draft = CustomerDraft::new(" Ada ", "Lovelace").with_email(" Ada@Example.COM ").with_phone("  ");
        let customer = ctx.store.add_customer(&draft).unwrap();

        assert_eq!(customer.full_name(), "Ada Lovelace");
        assert_eq!(customer.email.as_deref(), Some("ada@example.com"));
        assert_eq!(customer.phone, None);
        assert!(customer.is_active);
        assert_eq!(ctx.store.get_customer(customer.id).unwrap(), customer);
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_customer_validation(ctx: &mut CustomerTestContext) {
        assert!(ctx.store.add_customer(&CustomerDraft::new("", "Lovelace")).unwrap_err().is_validation());
        assert!(ctx.store.add_customer(&CustomerDraft::new("Ada", " ")).unwrap_err().is_validation());

        let bad_email = CustomerDraft::new("Ada", "Lovelace").with_email("ada.example.com");
        assert!(ctx.store.add_customer(&bad_email).unwrap_err().is_validation());
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_duplicate_email_is_rejected(ctx: &mut CustomerTestContext) {
        ctx.store
            .add_customer(&CustomerDraft::new("Ada", "Lovelace").with_email("ada@example.com"))
            .unwrap();
        let other = ctx
            .store
            .add_customer(&CustomerDraft::new("Alan", "Turing").with_email("alan@example.com"))
            .unwrap();

        let err = ctx
            .store
            .add_customer(&CustomerDraft::new("Ada", "Byron").with_email("ADA@example.com"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        let taken = CustomerDraft::new("Alan", "Turing").with_email("ada@example.com");
        assert!(matches!(ctx.store.update_customer(other.id, &taken), Err(StoreError::Duplicate { .. })));

        // Keeping one's own email is not a conflict.
        let same = CustomerDraft::new("Alan M.", "Turing").with_email("alan@example.com");
        let updated = ctx.store.update_customer(other.id, &same).unwrap();
        assert_eq!(updated.first_name, "Alan M.");
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_search_customers(ctx: &mut CustomerTestContext) {
        let ada = ctx.store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();
        ctx.store.add_customer(&CustomerDraft::new("Alan", "Turing")).unwrap();
        ctx.store.add_customer(&CustomerDraft::new("Grace", "Hopper")).unwrap();

        assert_eq!(ctx.store.search_customers("", false).unwrap().len(), 3);

        let by_last = ctx.store.search_customers("turing", false).unwrap();
        assert_eq!(by_last.len(), 1);
        assert_eq!(by_last[0].first_name, "Alan");

        let by_full = ctx.store.search_customers("Grace Hop", false).unwrap();
        assert_eq!(by_full.len(), 1);

        let by_id = ctx.store.search_customers(&ada.id.to_string(), false).unwrap();
        assert_eq!(by_id, vec![ada]);

        assert!(ctx.store.search_customers("nobody", false).unwrap().is_empty());
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_deactivate_customer(ctx: &mut CustomerTestContext) {
        let admin = ctx.admin.clone();
        let customer = ctx.store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();
        let movie = ctx.store.add_movie(&MovieDraft::new("Heat", Money::from_cents(300), 2)).unwrap();
        let rental = ctx.store.rent_movie(&admin, customer.id, movie.id, None).unwrap();

        let err = ctx.store.delete_customer(customer.id).unwrap_err();
        assert!(matches!(err, StoreError::InUse { open: 1, .. }));

        ctx.store.return_rental(&admin, rental.id).unwrap();
        ctx.store.delete_customer(customer.id).unwrap();

        assert!(!ctx.store.get_customer(customer.id).unwrap().is_active);
        assert!(ctx.store.search_customers("", false).unwrap().is_empty());
        assert_eq!(ctx.store.search_customers("", true).unwrap().len(), 1);

        // Inactive customers cannot rent.
        let err = ctx.store.rent_movie(&admin, customer.id, movie.id, None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(CustomerTestContext)]
    #[test]
    fn test_customer_history(ctx: &mut CustomerTestContext) {
        let admin = ctx.admin.clone();
        let customer = ctx.store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();
        let heat = ctx.store.add_movie(&MovieDraft::new("Heat", Money::from_cents(300), 2)).unwrap();
        let brazil = ctx.store.add_movie(&MovieDraft::new("Brazil", Money::from_cents(200), 2)).unwrap();
        ctx.store.rent_movie(&admin, customer.id, heat.id, None).unwrap();
        ctx.store.rent_movie(&admin, customer.id, brazil.id, None).unwrap();

        let history = ctx.store.customer_history(customer.id).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.customer_id == customer.id));
        assert!(ctx.store.customer_history(9999).unwrap_err().is_not_found());
    }
}
