//! Main menu shown after login.
//!
//! Every section runs against the shared [`Store`]. Errors raised inside a
//! section are printed and the menu is shown again; only terminal I/O
//! failures end the session.

use super::{customers, employees, movies, prompt, rentals, reports};
use crate::{
    libs::{employee::Employee, messages::Message, store::Store},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;

enum Section {
    Movies,
    Customers,
    Rentals,
    Reports,
    Employees,
    ChangePassword,
    Logout,
}

impl Section {
    fn available(employee: &Employee) -> Vec<Section> {
        let mut sections = vec![Section::Movies, Section::Customers, Section::Rentals, Section::Reports];
        if employee.role.can_manage_employees() {
            sections.push(Section::Employees);
        }
        sections.push(Section::ChangePassword);
        sections.push(Section::Logout);
        sections
    }

    fn label(&self) -> Message {
        match self {
            Section::Movies => Message::MenuMovies,
            Section::Customers => Message::MenuCustomers,
            Section::Rentals => Message::MenuRentals,
            Section::Reports => Message::MenuReports,
            Section::Employees => Message::MenuEmployees,
            Section::ChangePassword => Message::MenuChangePassword,
            Section::Logout => Message::MenuLogout,
        }
    }
}

pub fn run(store: &mut Store, employee: Employee) -> Result<()> {
    let marked = store.refresh_overdue()?;
    if marked > 0 {
        msg_info!(Message::OverdueMarked(marked));
    }

    let sections = Section::available(&employee);
    let labels: Vec<Message> = sections.iter().map(Section::label).collect();

    loop {
        msg_print!(Message::DashboardTitle(employee.full_name(), employee.role.to_string()), true);
        let outcome = match sections[prompt::menu(&labels)?] {
            Section::Movies => movies::menu(store),
            Section::Customers => customers::menu(store),
            Section::Rentals => rentals::menu(store, &employee),
            Section::Reports => reports::menu(store),
            Section::Employees => employees::menu(store, &employee),
            Section::ChangePassword => change_password(store, &employee),
            Section::Logout => break,
        };
        report_failure(outcome)?;
    }

    msg_success!(Message::LoggedOut(employee.username));
    msg_print!(Message::Goodbye);
    Ok(())
}

/// Prints a section error and keeps the session alive, unless the terminal
/// itself failed.
pub fn report_failure(outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.downcast_ref::<dialoguer::Error>().is_some() => Err(e),
        Err(e) => {
            tracing::debug!(error = ?e, "dashboard action failed");
            msg_error!(Message::StoreFailure(e.to_string()));
            Ok(())
        }
    }
}

fn change_password(store: &mut Store, employee: &Employee) -> Result<()> {
    let current = prompt::password(Message::PromptCurrentPassword)?;
    let new_password = prompt::password(Message::PromptNewPassword)?;
    let confirmation = prompt::password(Message::PromptConfirmPassword)?;
    if new_password != confirmation {
        msg_error!(Message::PasswordsDoNotMatch);
        return Ok(());
    }

    store.change_password(employee.id, &current, &new_password)?;
    msg_success!(Message::PasswordChanged);
    Ok(())
}
