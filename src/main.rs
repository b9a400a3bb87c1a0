//! bugreportz - generate a zipped bug report and stream it to stdout
//!
//! Starts the bug report service, waits for its socket and copies
//! everything the service sends to stdout.

use bugreportz::{cli, commands::RelayOptions, common::logging};
use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bugreportz",
    about = "Generate a zipped bugreport and write it to stdout",
    version,
    disable_version_flag = true,
    long_about = None
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(flatten)]
    options: RelayOptions,
}

/// Parse arguments, keeping usage and version text off stdout
///
/// stdout carries the bug report, so help, version and usage errors all go
/// to stderr. Usage errors exit with 1.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            eprint!("{}", e.render());
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(code);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = parse_args();

    logging::init_cli();

    if let Err(e) = cli::run(cli.options).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
