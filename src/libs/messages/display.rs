//! Display implementation for videostore messages.
//!
//! All user-facing wording lives in the single match below so the dashboard,
//! the setup commands and the error output stay consistent.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === GENERAL ===
            Message::Welcome => "Welcome to Videostore".to_string(),
            Message::Goodbye => "Goodbye!".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidDate(value) => format!("Invalid date '{}': use YYYY-MM-DD", value),
            Message::InvalidAmount(value) => format!("Invalid amount '{}': use a value like 2.99", value),
            Message::InvalidNumber(value) => format!("Invalid number '{}'", value),
            Message::FieldRequired(field) => format!("{} is required", field),
            Message::PromptTryAgain => "Try again?".to_string(),
            Message::StoreFailure(error) => format!("Operation failed: {}", error),

            // === CONFIGURATION ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigPath(path) => format!("Configuration file: {}", path),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleRentals => "Rental policy".to_string(),
            Message::ConfigModuleReports => "Report settings".to_string(),
            Message::PromptSelectModules => "Select sections to configure (space to select, enter to confirm)".to_string(),
            Message::PromptDatabasePath => "Database file (empty for the default location)".to_string(),
            Message::PromptBusyTimeout => "Busy timeout (ms)".to_string(),
            Message::PromptLateFeePerDay => "Late fee per day".to_string(),
            Message::PromptDefaultRentalDays => "Default rental period (days)".to_string(),
            Message::PromptMinReleaseYear => "Earliest accepted release year".to_string(),
            Message::PromptMaxYearsAhead => "Years ahead accepted for upcoming releases".to_string(),
            Message::PromptReportsDir => "Reports directory (empty for the default location)".to_string(),
            Message::PromptTopMovies => "Number of movies in the top list".to_string(),

            // === DATABASE & MIGRATIONS ===
            Message::DatabaseInitialized(path) => format!("Database ready at {}", path),
            Message::DatabaseOpenFailed(error) => format!("Cannot open the database: {}", error),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEmpty => "No migrations have been applied yet".to_string(),

            // === AUTHENTICATION ===
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptCurrentPassword => "Current password".to_string(),
            Message::PromptNewPassword => "New password".to_string(),
            Message::PromptConfirmPassword => "Repeat password".to_string(),
            Message::PasswordsDoNotMatch => "Passwords do not match".to_string(),
            Message::LoginSuccessful(name) => format!("Logged in as {}", name),
            Message::WrongPassword(left) => format!("Invalid username or password. Attempts left: {}", left),
            Message::TooManyLoginAttempts => "Too many failed login attempts".to_string(),
            Message::LoggedOut(name) => format!("{} logged out", name),
            Message::PasswordChanged => "Password changed".to_string(),
            Message::MalformedPasswordHash => "Stored password hash is malformed".to_string(),
            Message::DefaultAdminCreated(username) => format!("Default administrator '{}' created. Change the password after the first login.", username),
            Message::DefaultAdminExists => "An administrator account already exists".to_string(),
            Message::SampleDataSeeded(movies, customers) => format!("Sample data added: {} movie(s), {} customer(s)", movies, customers),
            Message::SampleDataPresent => "Sample data is already present".to_string(),

            // === DASHBOARD MENUS ===
            Message::DashboardTitle(name, role) => format!("Videostore dashboard ({}, {})", name, role),
            Message::MenuMovies => "Movies".to_string(),
            Message::MenuCustomers => "Customers".to_string(),
            Message::MenuRentals => "Rentals".to_string(),
            Message::MenuReports => "Reports".to_string(),
            Message::MenuEmployees => "Employees".to_string(),
            Message::MenuChangePassword => "Change password".to_string(),
            Message::MenuLogout => "Logout".to_string(),
            Message::MenuBack => "Back".to_string(),
            Message::MenuList => "List".to_string(),
            Message::MenuSearch => "Search".to_string(),
            Message::MenuAdd => "Add".to_string(),
            Message::MenuEdit => "Edit".to_string(),
            Message::MenuDelete => "Delete".to_string(),
            Message::MenuDetails => "Details".to_string(),
            Message::MenuRentalHistory => "Rental history".to_string(),
            Message::MenuIssueRental => "Issue rental".to_string(),
            Message::MenuReturnRental => "Return rental".to_string(),
            Message::MenuActiveRentals => "Current rentals".to_string(),
            Message::MenuOverdueRentals => "Overdue rentals".to_string(),
            Message::MenuRefreshOverdue => "Mark overdue rentals".to_string(),
            Message::MenuGenerateReport => "Rental report".to_string(),
            Message::MenuExportCurrentRentals => "Export current rentals".to_string(),
            Message::MenuExportOverdueRentals => "Export overdue rentals".to_string(),
            Message::MenuRegisterEmployee => "Register employee".to_string(),
            Message::MenuToggleEmployee => "Activate / deactivate".to_string(),
            Message::MenuChangeRole => "Change role".to_string(),
            Message::PromptSelectAction => "Select an action".to_string(),

            // === MOVIES ===
            Message::PromptMovieId => "Movie ID".to_string(),
            Message::PromptTitle => "Title".to_string(),
            Message::PromptDirector => "Director".to_string(),
            Message::PromptGenre => "Genre".to_string(),
            Message::PromptReleaseYear => "Release year".to_string(),
            Message::PromptDuration => "Duration (minutes)".to_string(),
            Message::PromptDescription => "Description".to_string(),
            Message::PromptRentalRate => "Rental rate per day".to_string(),
            Message::PromptTotalCopies => "Total copies".to_string(),
            Message::PromptAvailableOnly => "Only movies in stock?".to_string(),
            Message::PromptIncludeRetired => "Include retired movies?".to_string(),
            Message::MovieAdded(id, title) => format!("Movie '{}' added with ID {}", title, id),
            Message::MovieUpdated(id) => format!("Movie #{} updated", id),
            Message::MovieRetired(id) => format!("Movie #{} retired from the catalogue", id),
            Message::NoMoviesFound => "No movies found".to_string(),
            Message::ConfirmRetireMovie(title) => format!("Retire '{}' from the catalogue?", title),

            // === CUSTOMERS ===
            Message::PromptCustomerId => "Customer ID".to_string(),
            Message::PromptSearchTerm => "Customer ID or name (empty for all)".to_string(),
            Message::PromptFirstName => "First name".to_string(),
            Message::PromptLastName => "Last name".to_string(),
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPhone => "Phone".to_string(),
            Message::PromptAddress => "Address".to_string(),
            Message::CustomerAdded(id, name) => format!("Customer '{}' registered with ID {}", name, id),
            Message::CustomerUpdated(id) => format!("Customer #{} updated", id),
            Message::CustomerDeactivated(id) => format!("Customer #{} deactivated", id),
            Message::NoCustomersFound => "No customers found".to_string(),
            Message::ConfirmDeactivateCustomer(name) => format!("Deactivate customer '{}'?", name),

            // === RENTALS ===
            Message::PromptRentalId => "Rental ID".to_string(),
            Message::PromptDueDate => "Due date (YYYY-MM-DD)".to_string(),
            Message::PromptDateFrom => "From (YYYY-MM-DD)".to_string(),
            Message::PromptDateTo => "To (YYYY-MM-DD)".to_string(),
            Message::PromptRentalStatus => "Status".to_string(),
            Message::AnyStatus => "Any status".to_string(),
            Message::RentalIssued(id, title, due, charge) => format!("Rental #{} issued: '{}' due {} (charge {})", id, title, due, charge),
            Message::RentalReturned(id, title) => format!("Rental #{} returned: '{}'", id, title),
            Message::RentalReturnedLate(id, days, fee) => format!("Rental #{} returned {} day(s) late, late fee {}", id, days, fee),
            Message::NoRentalsFound => "No rentals found".to_string(),
            Message::NoActiveRentals => "No movies are currently rented".to_string(),
            Message::NoOverdueRentals => "No overdue rentals".to_string(),
            Message::OverdueMarked(count) => format!("{} rental(s) marked overdue", count),

            // === EMPLOYEES ===
            Message::PromptRole => "Role".to_string(),
            Message::PromptEmployeeId => "Employee ID".to_string(),
            Message::EmployeeRoleChanged(username, role) => format!("Employee '{}' is now {}", username, role),
            Message::EmployeeRegistered(id, username) => format!("Employee '{}' registered with ID {}", username, id),
            Message::EmployeeActivated(username) => format!("Employee '{}' activated", username),
            Message::EmployeeDeactivated(username) => format!("Employee '{}' deactivated", username),
            Message::EmployeeDeleted(id) => format!("Employee #{} deleted", id),
            Message::AdminOnly => "Only administrators can manage employees".to_string(),
            Message::ConfirmDeleteEmployee(username) => format!("Delete employee '{}' permanently?", username),

            // === REPORTS & EXPORT ===
            Message::ReportGenerated(from, to) => format!("Rental report {} .. {}", from, to),
            Message::ReportEmpty => "No rentals in the selected period".to_string(),
            Message::ChartRentalsPerMonth => "Rentals per month".to_string(),
            Message::ChartTopMovies => "Top rented movies".to_string(),
            Message::ChartRevenueByGenre => "Revenue by genre".to_string(),
            Message::PromptExportReport => "Export this report?".to_string(),
            Message::PromptExportFormat => "Export format".to_string(),
            Message::PromptExportPath => "Output file (empty for the reports directory)".to_string(),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),
            Message::ExportingData(format) => format!("Exporting data to {} format...", format),
        };

        write!(f, "{}", text)
    }
}
