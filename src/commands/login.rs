//! `login`: authenticates an employee and opens the dashboard.

use super::{dashboard, prompt};
use crate::{
    libs::{config::Config, error::StoreError, messages::Message, store::Store},
    msg_bail_anyhow, msg_error, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username to log in with; prompted for when omitted
    #[arg(short, long)]
    username: Option<String>,
}

pub fn cmd(args: LoginArgs) -> Result<()> {
    let config = Config::load()?;
    let mut store = match Store::open(&config) {
        Ok(store) => store,
        Err(e) => msg_bail_anyhow!(Message::DatabaseOpenFailed(e.to_string())),
    };

    msg_print!(Message::Welcome, true);

    let mut username = args.username;
    for attempt in 1..=MAX_ATTEMPTS {
        let name = match username.take() {
            Some(name) => name,
            None => prompt::required_text(Message::PromptUsername, None)?,
        };
        let password = prompt::password(Message::PromptPassword)?;

        match store.authenticate(&name, &password) {
            Ok(employee) => {
                msg_success!(Message::LoginSuccessful(employee.full_name()));
                return dashboard::run(&mut store, employee);
            }
            Err(StoreError::Unauthorized(reason)) if attempt < MAX_ATTEMPTS => {
                tracing::debug!(%reason, attempt, "authentication failed");
                msg_error!(Message::WrongPassword(MAX_ATTEMPTS - attempt));
            }
            Err(StoreError::Unauthorized(_)) => break,
            Err(e) => return Err(e.into()),
        }
    }

    msg_bail_anyhow!(Message::TooManyLoginAttempts)
}
