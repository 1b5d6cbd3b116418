use clap::Parser;
use std::process::ExitCode;

use shellfn::cmd::UrlCommand;
use shellfn::{Command, GlobalArgs};

/// shellfn-url - the `shellfn url` group as a standalone command
#[derive(Parser, Debug)]
#[command(
    name = "shellfn-url",
    version,
    about = "URL escaping and parsing",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: UrlCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shellfn::launch(&cli.global, Command::Url(cli.command))
}
