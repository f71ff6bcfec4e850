//! Command-line entry points.
//!
//! The setup commands (`init-db`, `create-admin`, `config`, `migrations`)
//! run once and exit; `login` opens the interactive dashboard.

pub mod admin;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod employees;
pub mod init;
pub mod login;
pub mod migrations;
pub mod movies;
pub mod prompt;
pub mod rentals;
pub mod reports;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure database, rental policy and reports")]
    Config(config::ConfigArgs),
    #[command(about = "Create or upgrade the database schema")]
    InitDb(init::InitDbArgs),
    #[command(about = "Create the default administrator account")]
    CreateAdmin,
    #[command(about = "Show database migration status")]
    Migrations(migrations::MigrationsArgs),
    #[command(about = "Log in and open the dashboard")]
    Login(login::LoginArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Config(args) => config::cmd(args),
            Commands::InitDb(args) => init::cmd(args),
            Commands::CreateAdmin => admin::cmd(),
            Commands::Migrations(args) => migrations::cmd(args),
            Commands::Login(args) => login::cmd(args),
        }
    }
}
