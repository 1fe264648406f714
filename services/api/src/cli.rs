use crate::demo::{run_basket_analyze, run_demo, BasketAnalyzeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use green_basket::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Green Basket",
    about = "Score grocery baskets and track cumulative carbon impact",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score baskets offline without starting the service
    Basket {
        #[command(subcommand)]
        command: BasketCommand,
    },
    /// Save a run of sample baskets and print the resulting impact and badges
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BasketCommand {
    /// Print the score of a list of barcodes
    Analyze(BasketAnalyzeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Product catalog CSV to load before accepting requests
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Basket {
            command: BasketCommand::Analyze(args),
        } => run_basket_analyze(args),
        Command::Demo(args) => run_demo(args),
    }
}
