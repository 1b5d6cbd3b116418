use clap::Parser;
use std::process::ExitCode;

use shellfn::cmd::NetCommand;
use shellfn::{Command, GlobalArgs};

/// shellfn-net - the `shellfn net` group as a standalone command
#[derive(Parser, Debug)]
#[command(
    name = "shellfn-net",
    version,
    about = "Network addresses and DNS lookups",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: NetCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shellfn::launch(&cli.global, Command::Net(cli.command))
}
