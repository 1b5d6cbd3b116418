use clap::Parser;
use std::process::ExitCode;

use shellfn::cmd::FilepathCommand;
use shellfn::{Command, GlobalArgs};

/// shellfn-filepath - the `shellfn filepath` group as a standalone command
#[derive(Parser, Debug)]
#[command(
    name = "shellfn-filepath",
    version,
    about = "File path manipulation",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: FilepathCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shellfn::launch(&cli.global, Command::Filepath(cli.command))
}
