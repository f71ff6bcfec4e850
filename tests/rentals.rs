#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use videostore::libs::config::{Config, DatabaseConfig};
    use videostore::libs::customer::{Customer, CustomerDraft};
    use videostore::libs::employee::Employee;
    use videostore::libs::error::StoreError;
    use videostore::libs::money::Money;
    use videostore::libs::movie::{Movie, MovieDraft};
    use videostore::libs::rental::{RentalFilter, RentalStatus};
    use videostore::libs::rules::{Clock, MAX_RENTAL_RATE};
    use videostore::libs::store::{Store, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct RentalTestContext {
        _temp_dir: TempDir,
        store: Store,
        admin: Employee,
        movie: Movie,
        customer: Customer,
    }

    impl TestContext for RentalTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                database: DatabaseConfig::at(temp_dir.path().join("test.db")),
                ..Config::default()
            };
            let mut store = Store::open_with_clock(&config, Clock::Fixed(date(2024, 3, 1))).unwrap();
            store.create_default_admin().unwrap();
            let admin = store.authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
            let movie = store
                .add_movie(&MovieDraft::new("Heat", Money::from_cents(250), 2).with_genre("Crime"))
                .unwrap();
            let customer = store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();

            RentalTestContext {
                _temp_dir: temp_dir,
                store,
                admin,
                movie,
                customer,
            }
        }
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_rent_decrements_stock_and_charges_per_day(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let rental = ctx
            .store
            .rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 4)))
            .unwrap();

        assert_eq!(rental.status, RentalStatus::Active);
        assert_eq!(rental.rental_date, date(2024, 3, 1));
        assert_eq!(rental.due_date, date(2024, 3, 4));
        assert_eq!(rental.charge, Money::from_cents(750));
        assert_eq!(rental.late_fee, Money::zero());
        assert_eq!(rental.movie_title, "Heat");
        assert_eq!(rental.customer_name, "Ada Lovelace");
        assert_eq!(rental.employee_id, admin.id);

        assert_eq!(ctx.store.get_movie(ctx.movie.id).unwrap().stock, ctx.movie.stock - 1);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_default_due_date(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let rental = ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap();
        assert_eq!(rental.due_date, date(2024, 3, 8));
        assert_eq!(rental.charge, Money::from_cents(250 * 7));
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_out_of_stock(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap();
        ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap();

        let movie = ctx.store.get_movie(ctx.movie.id).unwrap();
        assert_eq!(movie.stock, 0);
        assert!(!movie.is_available);

        let err = ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock { .. }));
        assert_eq!(ctx.store.get_movie(ctx.movie.id).unwrap().stock, 0);
        assert_eq!(ctx.store.current_rentals().unwrap().len(), 2);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_rent_rejects_bad_input(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let same_day = ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 1)));
        assert!(same_day.unwrap_err().is_validation());
        let past = ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 2, 20)));
        assert!(past.unwrap_err().is_validation());

        assert!(ctx.store.rent_movie(&admin, 9999, ctx.movie.id, None).unwrap_err().is_not_found());
        assert!(ctx.store.rent_movie(&admin, ctx.customer.id, 9999, None).unwrap_err().is_not_found());

        // Nothing was written by the failed attempts.
        assert_eq!(ctx.store.get_movie(ctx.movie.id).unwrap().stock, 2);
        assert!(ctx.store.current_rentals().unwrap().is_empty());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_return_on_time(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let rental = ctx
            .store
            .rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 4)))
            .unwrap();

        ctx.store.set_clock(Clock::Fixed(date(2024, 3, 4)));
        let receipt = ctx.store.return_rental(&admin, rental.id).unwrap();
        assert_eq!(receipt.late_days, 0);
        assert_eq!(receipt.late_fee, Money::zero());
        assert_eq!(receipt.total_paid, Money::from_cents(750));

        let returned = ctx.store.get_rental(rental.id).unwrap();
        assert_eq!(returned.status, RentalStatus::Returned);
        assert_eq!(returned.return_date, Some(date(2024, 3, 4)));
        assert_eq!(returned.returned_by, Some(admin.id));
        assert_eq!(ctx.store.get_movie(ctx.movie.id).unwrap().stock, 2);
        assert_eq!(ctx.store.get_return(rental.id).unwrap(), Some(receipt));
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_late_return_charges_fee(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let rental = ctx
            .store
            .rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 4)))
            .unwrap();

        ctx.store.set_clock(Clock::Fixed(date(2024, 3, 7)));
        let receipt = ctx.store.return_rental(&admin, rental.id).unwrap();
        assert_eq!(receipt.late_days, 3);
        assert_eq!(receipt.late_fee, Money::from_cents(600));
        assert_eq!(receipt.total_paid, Money::from_cents(1350));
        assert_eq!(ctx.store.get_rental(rental.id).unwrap().late_fee, Money::from_cents(600));
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_second_return_is_rejected(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let rental = ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap();
        ctx.store.return_rental(&admin, rental.id).unwrap();

        let err = ctx.store.return_rental(&admin, rental.id).unwrap_err();
        match err {
            StoreError::InvalidTransition { from, to, ref reason, .. } => {
                assert_eq!(from, RentalStatus::Returned);
                assert_eq!(to, RentalStatus::Returned);
                assert!(reason.contains("already returned"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(ctx.store.get_movie(ctx.movie.id).unwrap().stock, 2);
        assert!(ctx.store.return_rental(&admin, 9999).unwrap_err().is_not_found());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_overdue_lifecycle(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let late = ctx
            .store
            .rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 3)))
            .unwrap();
        ctx.store
            .rent_movie(&admin, ctx.customer.id, ctx.movie.id, Some(date(2024, 3, 10)))
            .unwrap();

        ctx.store.set_clock(Clock::Fixed(date(2024, 3, 5)));
        let overdue = ctx.store.overdue_rentals().unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, late.id);
        assert_eq!(overdue[0].days_overdue(date(2024, 3, 5)), 2);
        // Past due reads as overdue before the stored status is refreshed.
        assert_eq!(overdue[0].status, RentalStatus::Active);
        assert_eq!(overdue[0].status_on(date(2024, 3, 5)), RentalStatus::Overdue);
        assert_eq!(overdue[0].status_on(date(2024, 3, 3)), RentalStatus::Active);

        assert_eq!(ctx.store.refresh_overdue().unwrap(), 1);
        assert_eq!(ctx.store.refresh_overdue().unwrap(), 0);
        assert_eq!(ctx.store.get_rental(late.id).unwrap().status, RentalStatus::Overdue);

        let by_status = ctx.store.search_rentals(&RentalFilter::status(RentalStatus::Overdue)).unwrap();
        assert_eq!(by_status.len(), 1);

        // Overdue rentals can still be returned.
        let receipt = ctx.store.return_rental(&admin, late.id).unwrap();
        assert_eq!(receipt.late_days, 2);
        assert_eq!(ctx.store.get_rental(late.id).unwrap().status, RentalStatus::Returned);
        assert!(ctx.store.overdue_rentals().unwrap().is_empty());
        assert_eq!(ctx.store.current_rentals().unwrap().len(), 1);
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_search_rentals(ctx: &mut RentalTestContext) {
        let admin = ctx.admin.clone();
        let other = ctx.store.add_customer(&CustomerDraft::new("Alan", "Turing")).unwrap();
        ctx.store.rent_movie(&admin, ctx.customer.id, ctx.movie.id, None).unwrap();
        ctx.store.set_clock(Clock::Fixed(date(2024, 3, 10)));
        ctx.store.rent_movie(&admin, other.id, ctx.movie.id, None).unwrap();

        assert_eq!(ctx.store.search_rentals(&RentalFilter::customer(other.id)).unwrap().len(), 1);

        let march_first = RentalFilter {
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 3, 1)),
            ..RentalFilter::default()
        };
        let found = ctx.store.search_rentals(&march_first).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer_id, ctx.customer.id);

        let inverted = RentalFilter {
            from: Some(date(2024, 3, 10)),
            to: Some(date(2024, 3, 1)),
            ..RentalFilter::default()
        };
        assert!(ctx.store.search_rentals(&inverted).unwrap_err().is_validation());
    }

    #[test_context(RentalTestContext)]
    #[test]
    fn test_oversized_rate_is_rejected_before_renting(ctx: &mut RentalTestContext) {
        let huge: Money = "92233720368547758".parse().unwrap();
        let err = ctx.store.add_movie(&MovieDraft::new("Big", huge, 1)).unwrap_err();
        assert!(err.is_validation());

        // The highest accepted rate still prices a long rental without overflow.
        let admin = ctx.admin.clone();
        let pricey = ctx.store.add_movie(&MovieDraft::new("Pricey", MAX_RENTAL_RATE, 1)).unwrap();
        let rental = ctx
            .store
            .rent_movie(&admin, ctx.customer.id, pricey.id, Some(date(2100, 1, 1)))
            .unwrap();
        assert!(rental.charge > MAX_RENTAL_RATE);
    }

    #[test]
    fn test_late_fee_overflow_leaves_rental_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            database: DatabaseConfig::at(temp_dir.path().join("test.db")),
            ..Config::default()
        };
        config.rentals.late_fee_per_day = Money::from_cents(i64::MAX / 2);
        let mut store = Store::open_with_clock(&config, Clock::Fixed(date(2024, 3, 1))).unwrap();
        store.create_default_admin().unwrap();
        let admin = store.authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();
        let movie = store.add_movie(&MovieDraft::new("Heat", Money::from_cents(250), 1)).unwrap();
        let customer = store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();
        let rental = store.rent_movie(&admin, customer.id, movie.id, Some(date(2024, 3, 4))).unwrap();

        store.set_clock(Clock::Fixed(date(2024, 3, 10)));
        assert!(store.return_rental(&admin, rental.id).unwrap_err().is_validation());

        let unchanged = store.get_rental(rental.id).unwrap();
        assert_eq!(unchanged.status, RentalStatus::Active);
        assert_eq!(unchanged.return_date, None);
        assert_eq!(store.get_movie(movie.id).unwrap().stock, 0);
    }
}
