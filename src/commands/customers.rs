//! Customer section of the dashboard.

use super::{dashboard::report_failure, prompt};
use crate::{
    libs::{
        customer::CustomerDraft,
        messages::Message,
        store::Store,
        view::View,
    },
    msg_info, msg_success,
};
use anyhow::Result;

const ACTIONS: [Message; 8] = [
    Message::MenuList,
    Message::MenuSearch,
    Message::MenuDetails,
    Message::MenuAdd,
    Message::MenuEdit,
    Message::MenuDelete,
    Message::MenuRentalHistory,
    Message::MenuBack,
];

pub fn menu(store: &mut Store) -> Result<()> {
    loop {
        let outcome = match prompt::menu(&ACTIONS)? {
            0 => list(store, ""),
            1 => search(store),
            2 => details(store),
            3 => add(store),
            4 => edit(store),
            5 => deactivate(store),
            6 => history(store),
            _ => return Ok(()),
        };
        report_failure(outcome)?;
    }
}

fn list(store: &Store, term: &str) -> Result<()> {
    let customers = store.search_customers(term, false)?;
    if customers.is_empty() {
        msg_info!(Message::NoCustomersFound);
        return Ok(());
    }
    View::customers(&customers)
}

fn search(store: &Store) -> Result<()> {
    let term = prompt::optional_text(Message::PromptSearchTerm, None)?.unwrap_or_default();
    list(store, &term)
}

fn details(store: &Store) -> Result<()> {
    let customer = store.get_customer(prompt::id(Message::PromptCustomerId)?)?;
    View::customers(&[customer])
}

fn fill_draft(current: &CustomerDraft) -> Result<CustomerDraft> {
    let first = Some(current.first_name.as_str()).filter(|v| !v.is_empty());
    let last = Some(current.last_name.as_str()).filter(|v| !v.is_empty());

    Ok(CustomerDraft {
        first_name: prompt::required_text(Message::PromptFirstName, first)?,
        last_name: prompt::required_text(Message::PromptLastName, last)?,
        email: prompt::optional_text(Message::PromptEmail, current.email.as_deref())?,
        phone: prompt::optional_text(Message::PromptPhone, current.phone.as_deref())?,
        address: prompt::optional_text(Message::PromptAddress, current.address.as_deref())?,
    })
}

fn add(store: &mut Store) -> Result<()> {
    let blank = CustomerDraft::default();
    let added = prompt::until_valid(|| {
        let draft = fill_draft(&blank)?;
        Ok(store.add_customer(&draft)?)
    })?;

    if let Some(customer) = added {
        msg_success!(Message::CustomerAdded(customer.id, customer.full_name()));
    }
    Ok(())
}

fn edit(store: &mut Store) -> Result<()> {
    let customer = store.get_customer(prompt::id(Message::PromptCustomerId)?)?;
    let current = CustomerDraft::from(&customer);
    let updated = prompt::until_valid(|| {
        let draft = fill_draft(&current)?;
        Ok(store.update_customer(customer.id, &draft)?)
    })?;

    if let Some(customer) = updated {
        msg_success!(Message::CustomerUpdated(customer.id));
    }
    Ok(())
}

fn deactivate(store: &mut Store) -> Result<()> {
    let customer = store.get_customer(prompt::id(Message::PromptCustomerId)?)?;
    if !prompt::confirm(Message::ConfirmDeactivateCustomer(customer.full_name()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    store.delete_customer(customer.id)?;
    msg_success!(Message::CustomerDeactivated(customer.id));
    Ok(())
}

fn history(store: &Store) -> Result<()> {
    let rentals = store.customer_history(prompt::id(Message::PromptCustomerId)?)?;
    if rentals.is_empty() {
        msg_info!(Message::NoRentalsFound);
        return Ok(());
    }
    View::rentals(&rentals, store.today())
}
