//! Reports section: rental/revenue report, charts and exports.

use super::{dashboard::report_failure, prompt};
use crate::{
    libs::{
        chart,
        export::{ExportFormat, Exporter},
        messages::Message,
        rental::Rental,
        report::RentalReport,
        store::Store,
        view::View,
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};

const ACTIONS: [Message; 4] = [
    Message::MenuGenerateReport,
    Message::MenuExportCurrentRentals,
    Message::MenuExportOverdueRentals,
    Message::MenuBack,
];

pub fn menu(store: &mut Store) -> Result<()> {
    loop {
        let outcome = match prompt::menu(&ACTIONS)? {
            0 => report(store),
            1 => {
                let rentals = store.current_rentals()?;
                export_listing(store, "current_rentals", Message::MenuActiveRentals, &rentals)
            }
            2 => {
                store.refresh_overdue()?;
                let rentals = store.overdue_rentals()?;
                export_listing(store, "overdue_rentals", Message::MenuOverdueRentals, &rentals)
            }
            _ => return Ok(()),
        };
        report_failure(outcome)?;
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn report(store: &Store) -> Result<()> {
    let today = store.today();
    let from = prompt::date(Message::PromptDateFrom, Some(first_of_month(today)))?;
    let to = prompt::date(Message::PromptDateTo, Some(today))?;

    let report = store.report(from, to)?;
    msg_print!(Message::ReportGenerated(from.to_string(), to.to_string()), true);
    if report.is_empty() {
        msg_info!(Message::ReportEmpty);
        return Ok(());
    }

    View::report(&report)?;
    print_charts(&report);

    if prompt::confirm(Message::PromptExportReport)? {
        let exporter = choose_exporter(store, "rental_report")?;
        finish(exporter.export_report(&report));
    }
    Ok(())
}

fn print_charts(report: &RentalReport) {
    println!();
    println!("{}", chart::render(&Message::ChartRentalsPerMonth.to_string(), &chart::rentals_per_month(report)));
    println!("{}", chart::render(&Message::ChartTopMovies.to_string(), &chart::top_movies(report)));
    println!("{}", chart::render(&Message::ChartRevenueByGenre.to_string(), &chart::revenue_by_genre(report)));
}

fn export_listing(store: &Store, kind: &str, title: Message, rentals: &[Rental]) -> Result<()> {
    if rentals.is_empty() {
        msg_info!(Message::NoRentalsFound);
        return Ok(());
    }
    let exporter = choose_exporter(store, kind)?;
    finish(exporter.export_rentals(&title.to_string(), rentals, store.today()));
    Ok(())
}

fn choose_exporter(store: &Store, kind: &str) -> Result<Exporter> {
    let labels: Vec<String> = ExportFormat::ALL.iter().map(|f| f.label().to_string()).collect();
    let format = ExportFormat::ALL[prompt::select(Message::PromptExportFormat, &labels, 0)?];
    let output = prompt::optional_text(Message::PromptExportPath, None)?.map(std::path::PathBuf::from);
    let dir = store.reports().resolved_dir()?;
    Ok(Exporter::new(format, output, &dir, kind))
}

/// Export failures are reported without leaving the menu.
fn finish(result: Result<std::path::PathBuf>) {
    match result {
        Ok(path) => msg_success!(Message::ExportCompleted(path.display().to_string())),
        Err(e) => msg_error!(Message::ExportFailed(e.to_string())),
    }
}
