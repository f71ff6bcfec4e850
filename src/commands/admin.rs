//! `create-admin`: seeds the default administrator account.

use crate::{
    libs::{
        config::Config,
        messages::Message,
        store::{Store, DEFAULT_ADMIN_USERNAME},
    },
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::load()?;
    let mut store = Store::open(&config)?;

    if store.create_default_admin()? {
        msg_success!(Message::DefaultAdminCreated(DEFAULT_ADMIN_USERNAME.to_string()));
    } else {
        msg_info!(Message::DefaultAdminExists);
    }
    Ok(())
}
