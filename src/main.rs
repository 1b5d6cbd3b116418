use clap::Parser;
use std::process::ExitCode;

use shellfn::{Command, GlobalArgs};

/// shellfn - library functions as shell subcommands
///
/// Layout:
///   shellfn strings  <fn> [OPERAND ...]
///   shellfn filepath <fn> [OPERAND ...]
///   shellfn net      <fn> [OPERAND ...] [--timeout SECONDS]
///   shellfn url      <fn> [OPERAND ...]
///
/// Operands:
///   When a function takes N operands and N-1 are given, the first one is
///   read from standard input. Operands starting with '-' go after `--`.
///
/// Output:
///   Text and numbers are printed as-is; predicates print nothing and set the
///   exit status. List and record functions accept -o/--output "" or "json"
///   (SHELLFN_OUTPUT env fallback if -o is not provided).
///
/// Examples:
///   shellfn strings trim " hello " " "
///   printf 'a,b,,c' | shellfn strings split ,
///   shellfn strings hasprefix golang go && echo yes
///   shellfn filepath split static/myfile.css -o json
///   shellfn net parsecidr 192.0.2.1/24
///   shellfn url queryescape "a b&c"
#[derive(Parser, Debug)]
#[command(
    name = "shellfn",
    version,
    author,
    about = "shellfn - string, path, net and URL functions for the shell",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    shellfn::launch(&cli.global, cli.command)
}
