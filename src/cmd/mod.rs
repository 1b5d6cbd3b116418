/*!
Subcommand groups and the dispatcher.

Layout:
  src/cmd/
    mod.rs       (this file: `Command` + `run`)
    strings.rs   (StringsCommand  + execute_strings)
    filepath.rs  (FilepathCommand + execute_filepath)
    net.rs       (NetCommand      + execute_net)
    url.rs       (UrlCommand      + execute_url)
    shared.rs    (operands, stdin fallback, --output)
    format.rs    (Outcome / Reply rendering, exit status)
    usage.rs     (UsageError)

Conventions:
  - Each group module exposes one `execute_*` function returning a `Reply`;
    nothing is written until the whole result is known.
  - Argument structs derive `clap::Args` and are shared through `shared.rs`.
*/

pub mod filepath;
pub mod format;
pub mod net;
pub mod shared;
pub mod strings;
pub mod url;
pub mod usage;

use anyhow::Result;
use clap::Subcommand;
use std::io::{Read, Write};

pub use filepath::{FilepathCommand, execute_filepath};
pub use format::{OutputFormat, Outcome, Reply, Status};
pub use net::{NetCommand, execute_net};
pub use strings::{StringsCommand, execute_strings};
pub use url::{UrlCommand, execute_url};
pub use usage::{UsageError, is_usage};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// String inspection and manipulation
    #[command(subcommand)]
    Strings(StringsCommand),

    /// File path manipulation
    #[command(subcommand)]
    Filepath(FilepathCommand),

    /// Network addresses and DNS lookups
    #[command(subcommand)]
    Net(NetCommand),

    /// URL escaping and parsing
    #[command(subcommand)]
    Url(UrlCommand),
}

/// Execute `command`, then render its result to `stdout`.
pub fn run(command: Command, stdin: &mut dyn Read, stdout: &mut dyn Write) -> Result<Status> {
    let reply = match command {
        Command::Strings(cmd) => execute_strings(cmd, stdin)?,
        Command::Filepath(cmd) => execute_filepath(cmd, stdin)?,
        Command::Net(cmd) => execute_net(cmd, stdin)?,
        Command::Url(cmd) => execute_url(cmd, stdin)?,
    };
    format::render(&reply, stdout)
}
