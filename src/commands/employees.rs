//! Employee administration; the dashboard shows it to administrators only.

use super::{dashboard::report_failure, prompt};
use crate::{
    libs::{
        employee::{Employee, EmployeeDraft, Role},
        messages::Message,
        store::Store,
        view::View,
    },
    msg_error, msg_info, msg_success,
};
use anyhow::Result;

const ACTIONS: [Message; 6] = [
    Message::MenuList,
    Message::MenuRegisterEmployee,
    Message::MenuToggleEmployee,
    Message::MenuChangeRole,
    Message::MenuDelete,
    Message::MenuBack,
];

pub fn menu(store: &mut Store, actor: &Employee) -> Result<()> {
    if !actor.role.can_manage_employees() {
        msg_error!(Message::AdminOnly);
        return Ok(());
    }

    loop {
        let outcome = match prompt::menu(&ACTIONS)? {
            0 => list(store, actor),
            1 => register(store, actor),
            2 => toggle(store, actor),
            3 => change_role(store, actor),
            4 => delete(store, actor),
            _ => return Ok(()),
        };
        report_failure(outcome)?;
    }
}

fn list(store: &Store, actor: &Employee) -> Result<()> {
    View::employees(&store.list_employees(actor)?)
}

fn select_role(default: Role) -> Result<Role> {
    let labels: Vec<String> = Role::ALL.iter().map(|r| r.to_string()).collect();
    let current = Role::ALL.iter().position(|r| *r == default).unwrap_or(0);
    Ok(Role::ALL[prompt::select(Message::PromptRole, &labels, current)?])
}

fn register(store: &mut Store, actor: &Employee) -> Result<()> {
    let registered = prompt::until_valid(|| {
        let username = prompt::required_text(Message::PromptUsername, None)?;
        let password = prompt::password(Message::PromptPassword)?;
        let first_name = prompt::required_text(Message::PromptFirstName, None)?;
        let last_name = prompt::required_text(Message::PromptLastName, None)?;
        let email = prompt::required_text(Message::PromptEmail, None)?;
        let role = select_role(Role::Staff)?;

        let draft = EmployeeDraft::new(&username, &password, &first_name, &last_name, &email, role);
        Ok(store.register_employee(actor, &draft)?)
    })?;

    if let Some(employee) = registered {
        msg_success!(Message::EmployeeRegistered(employee.id, employee.username));
    }
    Ok(())
}

fn toggle(store: &mut Store, actor: &Employee) -> Result<()> {
    let employee = store.get_employee(prompt::id(Message::PromptEmployeeId)?)?;
    let activate = !employee.is_active;
    store.set_employee_active(actor, employee.id, activate)?;

    if activate {
        msg_success!(Message::EmployeeActivated(employee.username));
    } else {
        msg_success!(Message::EmployeeDeactivated(employee.username));
    }
    Ok(())
}

fn change_role(store: &mut Store, actor: &Employee) -> Result<()> {
    let employee = store.get_employee(prompt::id(Message::PromptEmployeeId)?)?;
    let role = select_role(employee.role)?;
    store.set_employee_role(actor, employee.id, role)?;
    msg_success!(Message::EmployeeRoleChanged(employee.username, role.to_string()));
    Ok(())
}

fn delete(store: &mut Store, actor: &Employee) -> Result<()> {
    let employee = store.get_employee(prompt::id(Message::PromptEmployeeId)?)?;
    if !prompt::confirm(Message::ConfirmDeleteEmployee(employee.username.clone()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    store.delete_employee(actor, employee.id)?;
    msg_success!(Message::EmployeeDeleted(employee.id));
    Ok(())
}
