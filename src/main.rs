use clap::{Parser, Subcommand};

mod aggregate;
mod amount;
mod cmd;
mod dates;
mod mirror;
mod records;
mod store;

#[derive(Parser, Debug)]
#[command(name = "opsboard", version, about = "Internal reporting dashboard over flat CSV files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the revenue overview
    Revenue(cmd::revenue::RevenueCommand),
    /// Show the supply chain monthly dashboard
    Supply(cmd::supply::SupplyCommand),
    /// Show the sales overview
    Sales(cmd::sales::SalesCommand),
    /// Append a record to one of the domain files
    Add(cmd::add::AddCommand),
    /// Create missing data files with their header rows
    Init(cmd::init::InitCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    match &cli.command {
        Command::Revenue(cmd) => cmd.exec(),
        Command::Supply(cmd) => cmd.exec(),
        Command::Sales(cmd) => cmd.exec(),
        Command::Add(cmd) => cmd.exec(),
        Command::Init(cmd) => cmd.exec(),
    }
}
