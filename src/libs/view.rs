use super::customer::Customer;
use super::employee::Employee;
use super::movie::Movie;
use super::rental::{Rental, ReturnReceipt};
use super::report::RentalReport;
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{row, Table};

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub struct View {}

impl View {
    pub fn movies(movies: &[Movie]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "GENRE", "YEAR", "RATE", "STOCK", "AVAILABLE"]);
        for movie in movies {
            table.add_row(row![
                movie.id,
                movie.title,
                or_dash(&movie.genre),
                or_dash(&movie.release_year),
                movie.rental_rate,
                format!("{}/{}", movie.stock, movie.total_copies),
                if movie.is_active { yes_no(movie.is_available) } else { "retired" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn movie(movie: &Movie) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", movie.id]);
        table.add_row(row!["TITLE", movie.title]);
        table.add_row(row!["DIRECTOR", or_dash(&movie.director)]);
        table.add_row(row!["GENRE", or_dash(&movie.genre)]);
        table.add_row(row!["YEAR", or_dash(&movie.release_year)]);
        table.add_row(row!["DURATION", movie.duration_minutes.map(|m| format!("{} min", m)).unwrap_or_else(|| "-".to_string())]);
        table.add_row(row!["RATE / DAY", movie.rental_rate]);
        table.add_row(row!["IN STOCK", movie.stock]);
        table.add_row(row!["RENTED OUT", movie.rented_out()]);
        table.add_row(row!["TOTAL COPIES", movie.total_copies]);
        table.add_row(row!["ACTIVE", yes_no(movie.is_active)]);
        table.add_row(row!["DESCRIPTION", or_dash(&movie.description)]);
        table.printstd();

        Ok(())
    }

    pub fn customers(customers: &[Customer]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "EMAIL", "PHONE", "REGISTERED", "ACTIVE"]);
        for customer in customers {
            table.add_row(row![
                customer.id,
                customer.full_name(),
                or_dash(&customer.email),
                or_dash(&customer.phone),
                customer.registered_at,
                yes_no(customer.is_active)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn rentals(rentals: &[Rental], today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "CUSTOMER", "MOVIE", "RENTED", "DUE", "RETURNED", "STATUS", "LATE", "CHARGE", "FEE"]);
        for rental in rentals {
            table.add_row(row![
                rental.id,
                rental.customer_name,
                rental.movie_title,
                rental.rental_date,
                rental.due_date,
                or_dash(&rental.return_date),
                rental.status_on(today),
                rental.days_overdue(today),
                rental.charge,
                rental.late_fee
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn employees(employees: &[Employee]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME", "NAME", "EMAIL", "ROLE", "ACTIVE"]);
        for employee in employees {
            table.add_row(row![
                employee.id,
                employee.username,
                employee.full_name(),
                employee.email,
                employee.role,
                yes_no(employee.is_active)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn receipt(receipt: &ReturnReceipt) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["RENTAL", receipt.rental_id]);
        table.add_row(row!["MOVIE", receipt.movie_title]);
        table.add_row(row!["RETURNED", receipt.return_date]);
        table.add_row(row!["DAYS LATE", receipt.late_days]);
        table.add_row(row!["LATE FEE", receipt.late_fee]);
        table.add_row(row!["TOTAL PAID", receipt.total_paid]);
        table.printstd();

        Ok(())
    }

    pub fn report(report: &RentalReport) -> Result<()> {
        let s = &report.summary;
        let mut summary = Table::new();
        summary.add_row(row!["PERIOD", format!("{} .. {}", report.from, report.to)]);
        summary.add_row(row!["RENTALS", s.rentals]);
        summary.add_row(row!["ACTIVE / OVERDUE / RETURNED", format!("{} / {} / {}", s.active, s.overdue, s.returned)]);
        summary.add_row(row!["CHARGES", s.charges]);
        summary.add_row(row!["LATE FEES", s.late_fees]);
        summary.add_row(row!["REVENUE", s.revenue]);
        summary.add_row(row!["CUSTOMERS", s.unique_customers]);
        summary.add_row(row!["MOVIES", s.unique_movies]);
        summary.printstd();

        let mut monthly = Table::new();
        monthly.add_row(row!["MONTH", "RENTALS", "REVENUE", "CUSTOMERS", "MOVIES"]);
        for m in &report.monthly {
            monthly.add_row(row![m.month, m.rentals, m.revenue, m.unique_customers, m.unique_movies]);
        }
        monthly.printstd();

        let mut top = Table::new();
        top.add_row(row!["#", "TITLE", "GENRE", "RENTALS", "REVENUE"]);
        for (rank, m) in report.top_movies.iter().enumerate() {
            top.add_row(row![rank + 1, m.title, m.genre, m.rentals, m.revenue]);
        }
        top.printstd();

        let mut genres = Table::new();
        genres.add_row(row!["GENRE", "RENTALS", "REVENUE"]);
        for g in &report.genres {
            genres.add_row(row![g.genre, g.rentals, g.revenue]);
        }
        genres.printstd();

        Ok(())
    }
}
