//! `init-db`: creates the database file and applies pending migrations,
//! optionally loading the demo catalogue.

use crate::{
    db::{db::Db, migrations::MigrationManager},
    libs::{config::Config, messages::Message, rules::Clock, store::Store},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitDbArgs {
    /// Also add the sample movies and customers (skips rows already present)
    #[arg(long)]
    sample_data: bool,
}

pub fn cmd(args: InitDbArgs) -> Result<()> {
    let config = Config::load()?;
    let path = config.database.resolved_path()?;

    let db = Db::open(&config.database).map_err(|e| anyhow::anyhow!(Message::DatabaseOpenFailed(e.to_string()).to_string()))?;
    let version = MigrationManager::new().get_current_version(&db.conn)?;

    msg_success!(Message::DatabaseInitialized(path.display().to_string()));
    msg_info!(Message::DatabaseVersion(version));

    if args.sample_data {
        let mut store = Store::with_db(db, &config, Clock::System);
        let seeded = store.seed_sample_data()?;
        if seeded.is_empty() {
            msg_info!(Message::SampleDataPresent);
        } else {
            msg_success!(Message::SampleDataSeeded(seeded.movies, seeded.customers));
        }
    }
    Ok(())
}
