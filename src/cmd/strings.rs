/*!
`strings.rs`

The `strings` subcommand group. Every subcommand takes the text to work on as
its first operand; leave it off to read the text from standard input:

  shellfn strings trim " hello " " "      -> hello
  printf 'a,b,,c' | shellfn strings split ,
  shellfn strings hasprefix golang go     -> exit 0
  shellfn strings split a,b,c , -o json   -> ["a","b","c"]
*/

use anyhow::Result;
use clap::Subcommand;
use std::io::Read;

use crate::cmd::format::{Outcome, Reply};
use crate::cmd::shared::{Listing, Operands, parse_number, parse_rune};
use crate::funcs::strings as f;
use crate::log_debug;

#[derive(Subcommand, Debug)]
#[command(rename_all = "lower")]
pub enum StringsCommand {
    /// Exit 0 if A and B are equal: [A] B
    Compare(Operands),
    /// Exit 0 if SUBSTR is within S: [S] SUBSTR
    Contains(Operands),
    /// Exit 0 if any character of CHARS is within S: [S] CHARS
    ContainsAny(Operands),
    /// Count non-overlapping instances of SUBSTR: [S] SUBSTR
    Count(Operands),
    /// Split S around runs of whitespace: [S]
    Fields(Listing),
    /// Exit 0 if S begins with PREFIX: [S] PREFIX
    HasPrefix(Operands),
    /// Exit 0 if S ends with SUFFIX: [S] SUFFIX
    HasSuffix(Operands),
    /// Byte index of the first SUBSTR, or -1: [S] SUBSTR
    Index(Operands),
    /// Byte index of the first character from CHARS, or -1: [S] CHARS
    IndexAny(Operands),
    /// Byte index of the first RUNE, or -1: [S] RUNE
    IndexRune(Operands),
    /// Byte index of the last SUBSTR, or -1: [S] SUBSTR
    LastIndex(Operands),
    /// Byte index of the last character from CHARS, or -1: [S] CHARS
    LastIndexAny(Operands),
    /// COUNT copies of S: [S] COUNT
    Repeat(Operands),
    /// Replace the first N instances of OLD (N < 0: all): [S] OLD NEW N
    Replace(Operands),
    /// Replace every instance of OLD: [S] OLD NEW
    ReplaceAll(Operands),
    /// Substrings between each SEP: [S] SEP
    Split(Listing),
    /// Substrings after each SEP: [S] SEP
    SplitAfter(Listing),
    /// At most N substrings after each SEP (N < 0: all): [S] SEP N
    SplitAfterN(Listing),
    /// At most N substrings between each SEP (N < 0: all): [S] SEP N
    SplitN(Listing),
    /// Upper-case the first letter of each word: [S]
    Title(Operands),
    /// Lower-case S: [S]
    ToLower(Operands),
    /// Title-case every letter of S: [S]
    ToTitle(Operands),
    /// Upper-case S: [S]
    ToUpper(Operands),
    /// Strip leading and trailing characters in CUTSET: [S] CUTSET
    Trim(Operands),
    /// Strip leading characters in CUTSET: [S] CUTSET
    TrimLeft(Operands),
    /// Strip PREFIX if present: [S] PREFIX
    TrimPrefix(Operands),
    /// Strip trailing characters in CUTSET: [S] CUTSET
    TrimRight(Operands),
    /// Strip leading and trailing whitespace: [S]
    TrimSpace(Operands),
    /// Strip SUFFIX if present: [S] SUFFIX
    TrimSuffix(Operands),
}

pub fn execute_strings(cmd: StringsCommand, stdin: &mut dyn Read) -> Result<Reply> {
    use StringsCommand::*;
    log_debug!("strings: {cmd:?}");

    let reply = match cmd {
        Compare(ops) => {
            let [a, b] = ops.resolve::<2>(stdin)?;
            Reply::plain(a == b)
        }
        Contains(ops) => {
            let [s, substr] = ops.resolve::<2>(stdin)?;
            Reply::plain(s.contains(substr.as_str()))
        }
        ContainsAny(ops) => {
            let [s, chars] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::contains_any(&s, &chars))
        }
        Count(ops) => {
            let [s, substr] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::count(&s, &substr))
        }
        HasPrefix(ops) => {
            let [s, prefix] = ops.resolve::<2>(stdin)?;
            Reply::plain(s.starts_with(prefix.as_str()))
        }
        HasSuffix(ops) => {
            let [s, suffix] = ops.resolve::<2>(stdin)?;
            Reply::plain(s.ends_with(suffix.as_str()))
        }
        Index(ops) => {
            let [s, substr] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::index(&s, &substr))
        }
        IndexAny(ops) => {
            let [s, chars] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::index_any(&s, &chars))
        }
        IndexRune(ops) => {
            let [s, rune] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::index_rune(&s, parse_rune(&rune)?))
        }
        LastIndex(ops) => {
            let [s, substr] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::last_index(&s, &substr))
        }
        LastIndexAny(ops) => {
            let [s, chars] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::last_index_any(&s, &chars))
        }
        Repeat(ops) => {
            let [s, count] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::repeat(&s, parse_number(&count)?)?)
        }
        Replace(ops) => {
            let [s, old, new, n] = ops.resolve::<4>(stdin)?;
            Reply::plain(f::replace(&s, &old, &new, parse_number(&n)?))
        }
        ReplaceAll(ops) => {
            let [s, old, new] = ops.resolve::<3>(stdin)?;
            Reply::plain(s.replace(old.as_str(), &new))
        }
        Fields(args) => {
            let format = args.output.format()?;
            let [s] = args.operands.resolve::<1>(stdin)?;
            Reply::new(f::fields(&s), format)
        }
        Split(args) => {
            let format = args.output.format()?;
            let [s, sep] = args.operands.resolve::<2>(stdin)?;
            Reply::new(f::split(&s, &sep), format)
        }
        SplitAfter(args) => {
            let format = args.output.format()?;
            let [s, sep] = args.operands.resolve::<2>(stdin)?;
            Reply::new(f::split_after(&s, &sep), format)
        }
        SplitAfterN(args) => {
            let format = args.output.format()?;
            let [s, sep, n] = args.operands.resolve::<3>(stdin)?;
            Reply::new(f::split_after_n(&s, &sep, parse_number(&n)?), format)
        }
        SplitN(args) => {
            let format = args.output.format()?;
            let [s, sep, n] = args.operands.resolve::<3>(stdin)?;
            Reply::new(f::split_n(&s, &sep, parse_number(&n)?), format)
        }
        Title(ops) => unary(ops, stdin, f::title)?,
        ToLower(ops) => unary(ops, stdin, f::to_lower)?,
        ToTitle(ops) => unary(ops, stdin, f::to_title)?,
        ToUpper(ops) => unary(ops, stdin, f::to_upper)?,
        TrimSpace(ops) => unary(ops, stdin, |s| f::trim_space(s).to_string())?,
        Trim(ops) => {
            let [s, cutset] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::trim(&s, &cutset))
        }
        TrimLeft(ops) => {
            let [s, cutset] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::trim_left(&s, &cutset))
        }
        TrimPrefix(ops) => {
            let [s, prefix] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::trim_prefix(&s, &prefix))
        }
        TrimRight(ops) => {
            let [s, cutset] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::trim_right(&s, &cutset))
        }
        TrimSuffix(ops) => {
            let [s, suffix] = ops.resolve::<2>(stdin)?;
            Reply::plain(f::trim_suffix(&s, &suffix))
        }
    };
    Ok(reply)
}

fn unary(ops: Operands, stdin: &mut dyn Read, func: impl Fn(&str) -> String) -> Result<Reply> {
    let [s] = ops.resolve::<1>(stdin)?;
    Ok(Reply::plain(Outcome::Text(func(&s))))
}
