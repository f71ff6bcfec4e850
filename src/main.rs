use videostore::commands::Cli;
use videostore::libs::messages::macros::init_logging;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    Cli::menu()
}
