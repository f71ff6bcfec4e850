#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use videostore::libs::config::{Config, DatabaseConfig};
    use videostore::libs::customer::CustomerDraft;
    use videostore::libs::export::{ExportFormat, Exporter};
    use videostore::libs::money::Money;
    use videostore::libs::movie::MovieDraft;
    use videostore::libs::rental::Rental;
    use videostore::libs::report::UNKNOWN_GENRE;
    use videostore::libs::rules::Clock;
    use videostore::libs::store::{Store, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct ReportTestContext {
        temp_dir: TempDir,
        store: Store,
    }

    /// Five rentals across January and February 2024, one returned late.
    impl TestContext for ReportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config = Config {
                database: DatabaseConfig::at(temp_dir.path().join("test.db")),
                ..Config::default()
            };
            let mut store = Store::open_with_clock(&config, Clock::Fixed(date(2024, 1, 5))).unwrap();
            store.create_default_admin().unwrap();
            let admin = store.authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).unwrap();

            let alien = store
                .add_movie(&MovieDraft::new("Alien", Money::from_cents(200), 5).with_genre("Sci-Fi"))
                .unwrap();
            let brazil = store
                .add_movie(&MovieDraft::new("Brazil", Money::from_cents(100), 5).with_genre("Comedy"))
                .unwrap();
            let casablanca = store.add_movie(&MovieDraft::new("Casablanca", Money::from_cents(300), 5)).unwrap();
            let ada = store.add_customer(&CustomerDraft::new("Ada", "Lovelace")).unwrap();
            let alan = store.add_customer(&CustomerDraft::new("Alan", "Turing")).unwrap();

            // 2024-01-05: two 3-day rentals.
            let first = store.rent_movie(&admin, ada.id, alien.id, Some(date(2024, 1, 8))).unwrap();
            store.rent_movie(&admin, alan.id, brazil.id, Some(date(2024, 1, 8))).unwrap();

            // Returned two days late.
            store.set_clock(Clock::Fixed(date(2024, 1, 10)));
            store.return_rental(&admin, first.id).unwrap();

            store.set_clock(Clock::Fixed(date(2024, 2, 1)));
            store.rent_movie(&admin, alan.id, alien.id, Some(date(2024, 2, 3))).unwrap();
            store.rent_movie(&admin, ada.id, casablanca.id, Some(date(2024, 2, 2))).unwrap();

            store.set_clock(Clock::Fixed(date(2024, 3, 1)));
            store.rent_movie(&admin, ada.id, brazil.id, Some(date(2024, 3, 2))).unwrap();

            ReportTestContext { temp_dir, store }
        }
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_report_totals_match_records(ctx: &mut ReportTestContext) {
        let report = ctx.store.report(date(2024, 1, 1), date(2024, 2, 29)).unwrap();

        assert_eq!(report.summary.rentals, 4);
        // 600 + 300 + 400 + 300 in charges, 400 in late fees.
        assert_eq!(report.summary.charges, Money::from_cents(1600));
        assert_eq!(report.summary.late_fees, Money::from_cents(400));
        assert_eq!(report.summary.revenue, Money::from_cents(2000));
        assert_eq!(report.summary.returned, 1);
        assert_eq!(report.summary.unique_customers, 2);
        assert_eq!(report.summary.unique_movies, 3);

        let from_records: Money = report.rentals.iter().map(Rental::revenue).sum();
        assert_eq!(from_records, report.summary.revenue);
        let monthly: Money = report.monthly.iter().map(|m| m.revenue).sum();
        assert_eq!(monthly, report.summary.revenue);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_report_breakdowns(ctx: &mut ReportTestContext) {
        let report = ctx.store.report(date(2024, 1, 1), date(2024, 3, 31)).unwrap();

        let months: Vec<&str> = report.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(report.monthly[0].rentals, 2);
        assert_eq!(report.monthly[0].revenue, Money::from_cents(1300));

        assert_eq!(report.top_movies[0].title, "Alien");
        assert_eq!(report.top_movies[0].rentals, 2);
        assert_eq!(report.top_movies[1].title, "Brazil");

        assert!(report.genres.iter().any(|g| g.genre == UNKNOWN_GENRE && g.rentals == 1));
        assert_eq!(report.genres[0].genre, "Sci-Fi");
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_report_is_repeatable(ctx: &mut ReportTestContext) {
        let first = ctx.store.report(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        let second = ctx.store.report(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(first, second);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_report_range_edges(ctx: &mut ReportTestContext) {
        let single_day = ctx.store.report(date(2024, 2, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(single_day.summary.rentals, 2);

        let empty = ctx.store.report(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.summary.revenue, Money::zero());

        assert!(ctx.store.report(date(2024, 3, 1), date(2024, 1, 1)).unwrap_err().is_validation());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_export_report_formats(ctx: &mut ReportTestContext) {
        let report = ctx.store.report(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        let dir = ctx.temp_dir.path().join("reports");

        for format in ExportFormat::ALL {
            let path = Exporter::new(format, None, &dir, "rental_report").export_report(&report).unwrap();
            assert!(path.exists());
            assert_eq!(path.extension().unwrap(), format.extension());
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_export_report_json_content(ctx: &mut ReportTestContext) {
        let report = ctx.store.report(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        let path = ctx.temp_dir.path().join("report.json");
        Exporter::new(ExportFormat::Json, Some(path.clone()), ctx.temp_dir.path(), "rental_report")
            .export_report(&report)
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["summary"]["rentals"], 5);
        assert_eq!(json["summary"]["revenue"], report.summary.revenue.cents());
        assert_eq!(json["monthly"].as_array().unwrap().len(), 3);
        assert_eq!(json["rentals"].as_array().unwrap().len(), 5);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_export_current_and_overdue_rentals(ctx: &mut ReportTestContext) {
        let today = ctx.store.today();
        let current = ctx.store.current_rentals().unwrap();
        let overdue = ctx.store.overdue_rentals().unwrap();
        assert_eq!(current.len(), 4);
        // Everything except the March rental (due 2024-03-02) is past due on 2024-03-01.
        assert_eq!(overdue.len(), 3);

        let csv_path = ctx.temp_dir.path().join("current.csv");
        Exporter::new(ExportFormat::Csv, Some(csv_path.clone()), ctx.temp_dir.path(), "current_rentals")
            .export_rentals("Current rentals", &current, today)
            .unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("ID,Customer,Movie"));
        assert_eq!(text.lines().count(), current.len() + 1);

        let xlsx = Exporter::new(ExportFormat::Excel, None, ctx.temp_dir.path(), "overdue_rentals")
            .export_rentals("Overdue rentals", &overdue, today)
            .unwrap();
        assert!(xlsx.exists());

        let json_path = ctx.temp_dir.path().join("overdue.json");
        Exporter::new(ExportFormat::Json, Some(json_path.clone()), ctx.temp_dir.path(), "overdue_rentals")
            .export_rentals("Overdue rentals", &overdue, today)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r["days_overdue"].as_i64().unwrap() > 0));
    }
}
