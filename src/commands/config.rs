//! `config`: interactive configuration wizard.

use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print the effective configuration (file plus environment) and exit
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(args: ConfigArgs) -> Result<()> {
    if args.show {
        msg_info!(Message::ConfigPath(Config::path()?.display().to_string()));
        println!("{}", serde_json::to_string_pretty(&Config::load()?)?);
        return Ok(());
    }

    Config::init()?.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
