use clap::Parser;
use std::process::ExitCode;

use shellfn::cmd::StringsCommand;
use shellfn::{Command, GlobalArgs};

/// shellfn-strings - the `shellfn strings` group as a standalone command
#[derive(Parser, Debug)]
#[command(
    name = "shellfn-strings",
    version,
    about = "String inspection and manipulation",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: StringsCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shellfn::launch(&cli.global, Command::Strings(cli.command))
}
