//! Report and rental-listing export to Excel, CSV and JSON.
//!
//! Excel workbooks get one sheet per report section. CSV files stack the same
//! sections vertically with a title row before each. JSON is the serialized
//! report structure.

use crate::libs::messages::Message;
use crate::libs::money::Money;
use crate::libs::rental::Rental;
use crate::libs::report::RentalReport;
use crate::msg_debug;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Excel,
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Excel, ExportFormat::Csv, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel (.xlsx)",
            ExportFormat::Csv => "CSV (.csv)",
            ExportFormat::Json => "JSON (.json)",
        }
    }
}

/// Flat rental row as written to listings.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRental {
    pub id: i64,
    pub customer: String,
    pub movie: String,
    pub employee: String,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: String,
    pub days_overdue: i64,
    pub charge: Money,
    pub late_fee: Money,
}

impl ExportRental {
    pub fn from_rental(rental: &Rental, today: NaiveDate) -> Self {
        Self {
            id: rental.id,
            customer: rental.customer_name.clone(),
            movie: rental.movie_title.clone(),
            employee: rental.employee_name.clone(),
            rental_date: rental.rental_date,
            due_date: rental.due_date,
            return_date: rental.return_date,
            status: rental.status_on(today).to_string(),
            days_overdue: rental.days_overdue(today),
            charge: rental.charge,
            late_fee: rental.late_fee,
        }
    }
}

const RENTAL_HEADERS: [&str; 11] = [
    "ID",
    "Customer",
    "Movie",
    "Employee",
    "Rental date",
    "Due date",
    "Return date",
    "Status",
    "Days overdue",
    "Charge",
    "Late fee",
];

fn rental_record(row: &ExportRental) -> Vec<String> {
    vec![
        row.id.to_string(),
        row.customer.clone(),
        row.movie.clone(),
        row.employee.clone(),
        row.rental_date.to_string(),
        row.due_date.to_string(),
        row.return_date.map(|d| d.to_string()).unwrap_or_default(),
        row.status.clone(),
        row.days_overdue.to_string(),
        format!("{:.2}", row.charge.as_f64()),
        format!("{:.2}", row.late_fee.as_f64()),
    ]
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file goes to `default_dir` as
    /// `videostore_{kind}_{timestamp}.{ext}`.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, default_dir: &Path, kind: &str) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            default_dir.join(format!(
                "videostore_{}_{}.{}",
                kind,
                Local::now().format("%Y%m%d_%H%M%S"),
                format.extension()
            ))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn prepare(&self) -> Result<()> {
        msg_debug!(Message::ExportingData(self.format.extension().to_string()));
        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn export_report(&self, report: &RentalReport) -> Result<PathBuf> {
        self.prepare()?;
        match self.format {
            ExportFormat::Excel => self.export_report_excel(report)?,
            ExportFormat::Csv => self.export_report_csv(report)?,
            ExportFormat::Json => self.write_json(report)?,
        }
        tracing::info!(path = %self.output_path.display(), rentals = report.summary.rentals, "report exported");
        Ok(self.output_path.clone())
    }

    /// Writes a rental listing such as current or overdue rentals.
    pub fn export_rentals(&self, title: &str, rentals: &[Rental], today: NaiveDate) -> Result<PathBuf> {
        self.prepare()?;
        let rows: Vec<ExportRental> = rentals.iter().map(|r| ExportRental::from_rental(r, today)).collect();
        match self.format {
            ExportFormat::Excel => {
                let mut workbook = Workbook::new();
                let header_format = header_format();
                let money_format = money_format();
                let sheet = workbook.add_worksheet();
                sheet.set_name(sheet_name(title))?;
                write_rental_sheet(sheet, &rows, &header_format, &money_format)?;
                workbook.save(&self.output_path)?;
            }
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_path(&self.output_path)?;
                wtr.write_record(RENTAL_HEADERS)?;
                for row in &rows {
                    wtr.write_record(rental_record(row))?;
                }
                wtr.flush()?;
            }
            ExportFormat::Json => self.write_json(&rows)?,
        }
        tracing::info!(path = %self.output_path.display(), count = rows.len(), "rentals exported");
        Ok(self.output_path.clone())
    }

    fn write_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_report_csv(&self, report: &RentalReport) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(&self.output_path)?;

        wtr.write_record(["RENTAL REPORT", &report.from.to_string(), &report.to.to_string()])?;
        wtr.write_record([""])?;

        let s = &report.summary;
        wtr.write_record(["SUMMARY"])?;
        wtr.write_record(["Rentals", &s.rentals.to_string()])?;
        wtr.write_record(["Rental charges", &format!("{:.2}", s.charges.as_f64())])?;
        wtr.write_record(["Late fees", &format!("{:.2}", s.late_fees.as_f64())])?;
        wtr.write_record(["Revenue", &format!("{:.2}", s.revenue.as_f64())])?;
        wtr.write_record(["Active", &s.active.to_string()])?;
        wtr.write_record(["Overdue", &s.overdue.to_string()])?;
        wtr.write_record(["Returned", &s.returned.to_string()])?;
        wtr.write_record(["Unique customers", &s.unique_customers.to_string()])?;
        wtr.write_record(["Unique movies", &s.unique_movies.to_string()])?;
        wtr.write_record([""])?;

        wtr.write_record(["MONTHLY"])?;
        wtr.write_record(["Month", "Rentals", "Revenue", "Customers", "Movies"])?;
        for m in &report.monthly {
            wtr.write_record([
                m.month.clone(),
                m.rentals.to_string(),
                format!("{:.2}", m.revenue.as_f64()),
                m.unique_customers.to_string(),
                m.unique_movies.to_string(),
            ])?;
        }
        wtr.write_record([""])?;

        wtr.write_record(["TOP MOVIES"])?;
        wtr.write_record(["Rank", "Title", "Genre", "Rentals", "Revenue"])?;
        for (rank, m) in report.top_movies.iter().enumerate() {
            wtr.write_record([
                (rank + 1).to_string(),
                m.title.clone(),
                m.genre.clone(),
                m.rentals.to_string(),
                format!("{:.2}", m.revenue.as_f64()),
            ])?;
        }
        wtr.write_record([""])?;

        wtr.write_record(["GENRES"])?;
        wtr.write_record(["Genre", "Rentals", "Revenue"])?;
        for g in &report.genres {
            wtr.write_record([g.genre.clone(), g.rentals.to_string(), format!("{:.2}", g.revenue.as_f64())])?;
        }
        wtr.write_record([""])?;

        wtr.write_record(["RENTALS"])?;
        wtr.write_record(RENTAL_HEADERS)?;
        for rental in &report.rentals {
            wtr.write_record(rental_record(&ExportRental::from_rental(rental, report.to)))?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_report_excel(&self, report: &RentalReport) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = header_format();
        let money_format = money_format();
        let title_format = Format::new().set_bold().set_font_size(14.0);

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Summary")?;
            let s = &report.summary;
            sheet.write_string_with_format(0, 0, format!("Rental report {} .. {}", report.from, report.to), &title_format)?;
            let counts: [(&str, usize); 6] = [
                ("Rentals", s.rentals),
                ("Active", s.active),
                ("Overdue", s.overdue),
                ("Returned", s.returned),
                ("Unique customers", s.unique_customers),
                ("Unique movies", s.unique_movies),
            ];
            let mut row = 2;
            for (label, value) in counts {
                sheet.write_string_with_format(row, 0, label, &header_format)?;
                sheet.write_number(row, 1, value as f64)?;
                row += 1;
            }
            for (label, value) in [("Rental charges", s.charges), ("Late fees", s.late_fees), ("Revenue", s.revenue)] {
                sheet.write_string_with_format(row, 0, label, &header_format)?;
                sheet.write_number_with_format(row, 1, value.as_f64(), &money_format)?;
                row += 1;
            }
            sheet.autofit();
        }

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Monthly")?;
            write_headers(sheet, &["Month", "Rentals", "Revenue", "Customers", "Movies"], &header_format)?;
            for (i, m) in report.monthly.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_string(row, 0, &m.month)?;
                sheet.write_number(row, 1, m.rentals as f64)?;
                sheet.write_number_with_format(row, 2, m.revenue.as_f64(), &money_format)?;
                sheet.write_number(row, 3, m.unique_customers as f64)?;
                sheet.write_number(row, 4, m.unique_movies as f64)?;
            }
            sheet.autofit();
        }

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Top Movies")?;
            write_headers(sheet, &["Rank", "Title", "Genre", "Rentals", "Revenue"], &header_format)?;
            for (i, m) in report.top_movies.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_number(row, 0, (i + 1) as f64)?;
                sheet.write_string(row, 1, &m.title)?;
                sheet.write_string(row, 2, &m.genre)?;
                sheet.write_number(row, 3, m.rentals as f64)?;
                sheet.write_number_with_format(row, 4, m.revenue.as_f64(), &money_format)?;
            }
            sheet.autofit();
        }

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Genres")?;
            write_headers(sheet, &["Genre", "Rentals", "Revenue"], &header_format)?;
            for (i, g) in report.genres.iter().enumerate() {
                let row = i as u32 + 1;
                sheet.write_string(row, 0, &g.genre)?;
                sheet.write_number(row, 1, g.rentals as f64)?;
                sheet.write_number_with_format(row, 2, g.revenue.as_f64(), &money_format)?;
            }
            sheet.autofit();
        }

        {
            let rows: Vec<ExportRental> = report.rentals.iter().map(|r| ExportRental::from_rental(r, report.to)).collect();
            let sheet = workbook.add_worksheet();
            sheet.set_name("Rentals")?;
            write_rental_sheet(sheet, &rows, &header_format, &money_format)?;
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}

fn header_format() -> Format {
    Format::new().set_bold().set_background_color(Color::Gray)
}

fn money_format() -> Format {
    Format::new().set_num_format("$#,##0.00")
}

/// Worksheet names are limited to 31 characters and some punctuation.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Rentals".to_string()
    } else {
        cleaned
    }
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_rental_sheet(sheet: &mut Worksheet, rows: &[ExportRental], header_format: &Format, money_format: &Format) -> Result<()> {
    write_headers(sheet, &RENTAL_HEADERS, header_format)?;
    for (i, r) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, r.id as f64)?;
        sheet.write_string(row, 1, &r.customer)?;
        sheet.write_string(row, 2, &r.movie)?;
        sheet.write_string(row, 3, &r.employee)?;
        sheet.write_string(row, 4, r.rental_date.to_string())?;
        sheet.write_string(row, 5, r.due_date.to_string())?;
        sheet.write_string(row, 6, r.return_date.map(|d| d.to_string()).unwrap_or_default())?;
        sheet.write_string(row, 7, &r.status)?;
        sheet.write_number(row, 8, r.days_overdue as f64)?;
        sheet.write_number_with_format(row, 9, r.charge.as_f64(), money_format)?;
        sheet.write_number_with_format(row, 10, r.late_fee.as_f64(), money_format)?;
    }
    sheet.autofit();
    Ok(())
}
