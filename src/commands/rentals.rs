//! Rental desk: issuing and returning copies.

use super::{dashboard::report_failure, prompt};
use crate::{
    libs::{employee::Employee, messages::Message, rental::{RentalFilter, RentalStatus}, rules, store::Store, view::View},
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;

const ACTIONS: [Message; 7] = [
    Message::MenuIssueRental,
    Message::MenuReturnRental,
    Message::MenuActiveRentals,
    Message::MenuOverdueRentals,
    Message::MenuRefreshOverdue,
    Message::MenuSearch,
    Message::MenuBack,
];

pub fn menu(store: &mut Store, employee: &Employee) -> Result<()> {
    loop {
        let outcome = match prompt::menu(&ACTIONS)? {
            0 => issue(store, employee),
            1 => return_copy(store, employee),
            2 => current(store),
            3 => overdue(store),
            4 => refresh(store),
            5 => search(store),
            _ => return Ok(()),
        };
        report_failure(outcome)?;
    }
}

fn issue(store: &mut Store, employee: &Employee) -> Result<()> {
    let default_due = rules::default_due_date(store.policy(), store.today());
    let issued = prompt::until_valid(|| {
        let customer_id = prompt::id(Message::PromptCustomerId)?;
        let movie_id = prompt::id(Message::PromptMovieId)?;
        let due_date = prompt::date(Message::PromptDueDate, Some(default_due))?;
        Ok(store.rent_movie(employee, customer_id, movie_id, Some(due_date))?)
    })?;

    if let Some(rental) = issued {
        msg_success!(Message::RentalIssued(
            rental.id,
            rental.movie_title.clone(),
            rental.due_date.to_string(),
            rental.charge.to_string()
        ));
    }
    Ok(())
}

fn return_copy(store: &mut Store, employee: &Employee) -> Result<()> {
    let receipt = store.return_rental(employee, prompt::id(Message::PromptRentalId)?)?;
    if receipt.late_days > 0 {
        msg_warning!(Message::RentalReturnedLate(receipt.rental_id, receipt.late_days, receipt.late_fee.to_string()));
    } else {
        msg_success!(Message::RentalReturned(receipt.rental_id, receipt.movie_title.clone()));
    }
    View::receipt(&receipt)
}

fn current(store: &Store) -> Result<()> {
    let rentals = store.current_rentals()?;
    if rentals.is_empty() {
        msg_info!(Message::NoActiveRentals);
        return Ok(());
    }
    View::rentals(&rentals, store.today())
}

fn overdue(store: &Store) -> Result<()> {
    let rentals = store.overdue_rentals()?;
    if rentals.is_empty() {
        msg_info!(Message::NoOverdueRentals);
        return Ok(());
    }
    View::rentals(&rentals, store.today())
}

fn refresh(store: &mut Store) -> Result<()> {
    let marked = store.refresh_overdue()?;
    msg_info!(Message::OverdueMarked(marked));
    Ok(())
}

fn search(store: &Store) -> Result<()> {
    let filter = RentalFilter {
        customer_id: prompt::optional_number(Message::PromptCustomerId, None)?,
        movie_id: prompt::optional_number(Message::PromptMovieId, None)?,
        from: prompt::optional_date(Message::PromptDateFrom, None)?,
        to: prompt::optional_date(Message::PromptDateTo, None)?,
        status: select_status()?,
    };
    let rentals = store.search_rentals(&filter)?;
    if rentals.is_empty() {
        msg_info!(Message::NoRentalsFound);
        return Ok(());
    }
    View::rentals(&rentals, store.today())
}

fn status_labels() -> Vec<String> {
    std::iter::once(Message::AnyStatus.to_string())
        .chain(RentalStatus::ALL.iter().map(|s| s.to_string()))
        .collect()
}

/// Index 0 is "any status".
fn status_at(index: usize) -> Option<RentalStatus> {
    index.checked_sub(1).and_then(|i| RentalStatus::ALL.get(i).copied())
}

fn select_status() -> Result<Option<RentalStatus>> {
    Ok(status_at(prompt::select(Message::PromptRentalStatus, &status_labels(), 0)?))
}
