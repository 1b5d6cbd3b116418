/*!
`filepath.rs`

The `filepath` subcommand group: lexical path manipulation plus a few
file-system backed operations (abs, evalsymlinks, glob).

  shellfn filepath base /usr/local/bin/    -> bin
  echo -n /a/b/c.txt | shellfn filepath ext -> .txt
  shellfn filepath split a/b.txt -o json   -> {"dir":"a/","file":"b.txt"}
  shellfn filepath rel /a /a/b/c           -> b/c
*/

use anyhow::Result;
use clap::Subcommand;
use std::io::Read;

use crate::cmd::format::{Outcome, Reply};
use crate::cmd::shared::{Listing, Operands};
use crate::funcs::path as f;
use crate::log_debug;

#[derive(Subcommand, Debug)]
#[command(rename_all = "lower")]
pub enum FilepathCommand {
    /// Absolute, cleaned form of PATH: [PATH]
    Abs(Operands),
    /// Last element of PATH: [PATH]
    Base(Operands),
    /// Shortest equivalent of PATH by lexical processing: [PATH]
    Clean(Operands),
    /// All but the last element of PATH: [PATH]
    Dir(Operands),
    /// PATH with symbolic links resolved: [PATH]
    EvalSymlinks(Operands),
    /// Extension of PATH: [PATH]
    Ext(Operands),
    /// Files matching PATTERN: [PATTERN]
    Glob(Listing),
    /// Exit 0 if PATH is absolute: [PATH]
    IsAbs(Operands),
    /// Path of TARGET relative to BASE: BASE TARGET
    Rel(Operands),
    /// Directory and file components of PATH: [PATH]
    Split(Listing),
    /// Entries of a colon-separated path LIST: [LIST]
    SplitList(Listing),
}

pub fn execute_filepath(cmd: FilepathCommand, stdin: &mut dyn Read) -> Result<Reply> {
    use FilepathCommand::*;
    log_debug!("filepath: {cmd:?}");

    let reply = match cmd {
        Abs(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::abs(&path)?)
        }
        Base(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::base(&path))
        }
        Clean(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::clean(&path))
        }
        Dir(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::dir(&path))
        }
        EvalSymlinks(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::eval_symlinks(&path)?)
        }
        Ext(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::ext(&path))
        }
        IsAbs(ops) => {
            let [path] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::is_abs(&path))
        }
        Rel(ops) => {
            let [base, target] = ops.exact::<2>()?;
            Reply::plain(f::rel(&base, &target)?)
        }
        Glob(args) => {
            let format = args.output.format()?;
            let [pattern] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::glob(&pattern)?, format)
        }
        Split(args) => {
            let format = args.output.format()?;
            let [path] = args.operands.resolve::<1>(stdin)?;
            let (dir, file) = f::split(&path);
            let record = Outcome::Record(vec![("dir", dir.to_string()), ("file", file.to_string())]);
            Reply::new(record, format)
        }
        SplitList(args) => {
            let format = args.output.format()?;
            let [list] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::split_list(&list), format)
        }
    };
    Ok(reply)
}
