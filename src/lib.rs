//! shellfn: string, path, network and URL library functions as shell subcommands.
//!
//! Every subcommand follows the same contract:
//!   - operands are positional; when exactly one is missing, the first is
//!     read from standard input
//!   - predicates report through the exit status (0 true, 1 false)
//!   - list and record results take `-o, --output` ("" or "json")
//!   - on error nothing is written to standard output
//!
//! Exit status: 0 success, 1 false predicate or failed operation, 2 usage error.

pub mod cmd;
pub mod funcs;
pub mod utils;

use clap::Args;
use std::io;
use std::process::ExitCode;

pub use cmd::Command;

/// Flags shared by `shellfn` and every group binary.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Increase verbosity (-v, -vv); diagnostics go to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Run `command` against the process's stdin / stdout and map the result to an exit status.
pub fn launch(global: &GlobalArgs, command: Command) -> ExitCode {
    utils::init_logging(utils::derive_level(global.verbose, global.quiet));

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    match cmd::run(command, &mut stdin, &mut stdout) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            if cmd::is_usage(&err) {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
