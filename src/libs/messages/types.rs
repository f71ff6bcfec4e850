//! Message type definitions for the videostore application.
//!
//! Every piece of user-facing text is a variant of [`Message`]. Grouping the
//! text in one enum keeps wording consistent between the dashboard, the setup
//! commands and error output. Rendering lives in [`super::display`].

#[derive(Debug, Clone)]
pub enum Message {
    // === GENERAL ===
    Welcome,
    Goodbye,
    OperationCancelled,
    InvalidDate(String),
    InvalidAmount(String),
    InvalidNumber(String),
    FieldRequired(String),
    PromptTryAgain,
    StoreFailure(String),

    // === CONFIGURATION ===
    ConfigSaved,
    ConfigPath(String),
    ConfigModuleDatabase,
    ConfigModuleRentals,
    ConfigModuleReports,
    PromptSelectModules,
    PromptDatabasePath,
    PromptBusyTimeout,
    PromptLateFeePerDay,
    PromptDefaultRentalDays,
    PromptMinReleaseYear,
    PromptMaxYearsAhead,
    PromptReportsDir,
    PromptTopMovies,

    // === DATABASE & MIGRATIONS ===
    DatabaseInitialized(String),
    DatabaseOpenFailed(String),
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEmpty,

    // === AUTHENTICATION ===
    PromptUsername,
    PromptPassword,
    PromptCurrentPassword,
    PromptNewPassword,
    PromptConfirmPassword,
    PasswordsDoNotMatch,
    LoginSuccessful(String),
    WrongPassword(u32),
    TooManyLoginAttempts,
    LoggedOut(String),
    PasswordChanged,
    MalformedPasswordHash,
    DefaultAdminCreated(String),
    DefaultAdminExists,
    SampleDataSeeded(usize, usize),
    SampleDataPresent,

    // === DASHBOARD MENUS ===
    DashboardTitle(String, String),
    MenuMovies,
    MenuCustomers,
    MenuRentals,
    MenuReports,
    MenuEmployees,
    MenuChangePassword,
    MenuLogout,
    MenuBack,
    MenuList,
    MenuSearch,
    MenuAdd,
    MenuEdit,
    MenuDelete,
    MenuDetails,
    MenuRentalHistory,
    MenuIssueRental,
    MenuReturnRental,
    MenuActiveRentals,
    MenuOverdueRentals,
    MenuRefreshOverdue,
    MenuGenerateReport,
    MenuExportCurrentRentals,
    MenuExportOverdueRentals,
    MenuRegisterEmployee,
    MenuToggleEmployee,
    MenuChangeRole,
    PromptSelectAction,

    // === MOVIES ===
    PromptMovieId,
    PromptTitle,
    PromptDirector,
    PromptGenre,
    PromptReleaseYear,
    PromptDuration,
    PromptDescription,
    PromptRentalRate,
    PromptTotalCopies,
    PromptAvailableOnly,
    PromptIncludeRetired,
    MovieAdded(i64, String),
    MovieUpdated(i64),
    MovieRetired(i64),
    NoMoviesFound,
    ConfirmRetireMovie(String),

    // === CUSTOMERS ===
    PromptCustomerId,
    PromptSearchTerm,
    PromptFirstName,
    PromptLastName,
    PromptEmail,
    PromptPhone,
    PromptAddress,
    CustomerAdded(i64, String),
    CustomerUpdated(i64),
    CustomerDeactivated(i64),
    NoCustomersFound,
    ConfirmDeactivateCustomer(String),

    // === RENTALS ===
    PromptRentalId,
    PromptDueDate,
    PromptDateFrom,
    PromptDateTo,
    PromptRentalStatus,
    AnyStatus,
    RentalIssued(i64, String, String, String),
    RentalReturned(i64, String),
    RentalReturnedLate(i64, i64, String),
    NoRentalsFound,
    NoActiveRentals,
    NoOverdueRentals,
    OverdueMarked(usize),

    // === EMPLOYEES ===
    PromptRole,
    PromptEmployeeId,
    EmployeeRoleChanged(String, String),
    EmployeeRegistered(i64, String),
    EmployeeActivated(String),
    EmployeeDeactivated(String),
    EmployeeDeleted(i64),
    AdminOnly,
    ConfirmDeleteEmployee(String),

    // === REPORTS & EXPORT ===
    ReportGenerated(String, String),
    ReportEmpty,
    ChartRentalsPerMonth,
    ChartTopMovies,
    ChartRevenueByGenre,
    PromptExportReport,
    PromptExportFormat,
    PromptExportPath,
    ExportCompleted(String),
    ExportFailed(String),
    ExportingData(String),
}
