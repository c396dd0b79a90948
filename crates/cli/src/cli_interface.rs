use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scale the service to one task and start the database
    Start {
        /// optional - The directory holding the .env file, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// Also ship the invocation logs to the configured CloudWatch log group
        #[clap(long)]
        ship_logs: bool,
    },
    /// Scale the service to zero tasks and stop the database
    Stop {
        /// optional - The directory holding the .env file, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// Also ship the invocation logs to the configured CloudWatch log group
        #[clap(long)]
        ship_logs: bool,
    },
    /// Show the environment the toggle would act on, without calling AWS
    Config {
        #[clap(long, short)]
        path: Option<String>,
    },
}
