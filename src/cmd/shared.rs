/*!
shared.rs - argument types and helpers shared by every subcommand group.

Focus:
  - Operands: positional operands + the stdin fallback rule
  - OutputArg / Listing: the `-o, --output` option of list / record subcommands
  - parse_number / parse_rune: typed operands

Operand rule: a subcommand needing N operands accepts exactly N positionals,
or N-1 positionals with the FIRST operand read from standard input (to EOF,
verbatim). Subcommands without stdin fallback accept exactly N.
*/

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;

use crate::cmd::format::OutputFormat;
use crate::cmd::usage::UsageError;
use crate::{log_debug, log_trace};

/// Environment fallback for `--output` when the flag is not given.
pub const OUTPUT_ENV: &str = "SHELLFN_OUTPUT";

/* ---- Operands ---- */

/// Positional operands of a subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct Operands {
    /// Operands; when one short, the first is read from standard input
    #[arg(value_name = "OPERAND", allow_negative_numbers = true)]
    pub values: Vec<String>,
}

impl Operands {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Operands {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Exactly `N` operands, the first one from `stdin` when only `N-1` were given.
    pub fn resolve<const N: usize>(&self, stdin: &mut dyn Read) -> Result<[String; N]> {
        let given = self.values.len();
        let values = if given == N {
            log_debug!("operands: {given} positional");
            self.values.clone()
        } else if given + 1 == N {
            log_debug!("operands: {given} positional, first from stdin");
            let mut values = Vec::with_capacity(N);
            values.push(read_stdin(stdin)?);
            values.extend(self.values.iter().cloned());
            values
        } else {
            return Err(UsageError::range(N, given).into());
        };
        Ok(into_array(values))
    }

    /// Exactly `N` positional operands; standard input is never consulted.
    pub fn exact<const N: usize>(&self) -> Result<[String; N]> {
        let given = self.values.len();
        if given != N {
            return Err(UsageError::exact(N, given).into());
        }
        Ok(into_array(self.values.clone()))
    }
}

fn into_array<const N: usize>(values: Vec<String>) -> [String; N] {
    let mut iter = values.into_iter();
    std::array::from_fn(|_| iter.next().unwrap_or_default())
}

/// Read standard input to end-of-stream as UTF-8, untouched.
pub fn read_stdin(stdin: &mut dyn Read) -> Result<String> {
    let mut buf = Vec::new();
    stdin
        .read_to_end(&mut buf)
        .context("failed to read standard input")?;
    log_trace!("stdin: {} bytes", buf.len());
    String::from_utf8(buf).context("standard input is not valid UTF-8")
}

/* ---- Output Option ---- */

/// `-o, --output` for subcommands returning a list or record.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArg {
    /// Output format: "" (plain text, one value per line) or "json"
    /// (falls back to SHELLFN_OUTPUT if omitted)
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output: Option<String>,
}

impl OutputArg {
    /// Validated format: flag > SHELLFN_OUTPUT env > plain.
    pub fn format(&self) -> Result<OutputFormat> {
        self.format_with_env(std::env::var(OUTPUT_ENV).ok())
    }

    pub fn format_with_env(&self, env: Option<String>) -> Result<OutputFormat> {
        let raw = self
            .output
            .clone()
            .or_else(|| env.filter(|s| !s.trim().is_empty()))
            .unwrap_or_default();
        let format = OutputFormat::parse(&raw)?;
        log_debug!("output format: {format:?}");
        Ok(format)
    }
}

/// Operands plus output option: the argument shape of list / record subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct Listing {
    #[command(flatten)]
    pub output: OutputArg,

    #[command(flatten)]
    pub operands: Operands,
}

/* ---- Typed Operands ---- */

/// Integer operand (counts, limits). Accepts an optional sign.
pub fn parse_number(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| UsageError::InvalidNumber(raw.to_string()).into())
}

/// Operand that must be exactly one character.
pub fn parse_rune(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(UsageError::InvalidRune.into()),
    }
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Reader that fails the test if anything tries to read it.
    struct Untouched;

    impl Read for Untouched {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            panic!("stdin must not be read");
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    fn usage(err: anyhow::Error) -> UsageError {
        err.downcast::<UsageError>().expect("usage error")
    }

    #[test]
    fn full_operands_bypass_stdin() {
        let ops = Operands::new(["golang", "go"]);
        let [s, prefix] = ops.resolve::<2>(&mut Untouched).unwrap();
        assert_eq!((s.as_str(), prefix.as_str()), ("golang", "go"));
    }

    #[test]
    fn missing_first_operand_comes_from_stdin_verbatim() {
        let ops = Operands::new([","]);
        let mut stdin = Cursor::new("a,b,,c\n");
        let [s, sep] = ops.resolve::<2>(&mut stdin).unwrap();
        assert_eq!(s, "a,b,,c\n", "trailing newline preserved");
        assert_eq!(sep, ",");
    }

    #[test]
    fn stdin_fills_first_of_many() {
        let ops = Operands::new(["old", "new"]);
        let mut stdin = Cursor::new("text");
        let [s, old, new] = ops.resolve::<3>(&mut stdin).unwrap();
        assert_eq!([s, old, new], ["text", "old", "new"]);
    }

    #[test]
    fn single_operand_from_stdin() {
        let ops = Operands::default();
        let [s] = ops.resolve::<1>(&mut Cursor::new("")).unwrap();
        assert_eq!(s, "");
    }

    #[test]
    fn wrong_count_is_usage_error_without_reading() {
        let too_few = Operands::default().resolve::<2>(&mut Untouched).unwrap_err();
        assert_eq!(usage(too_few), UsageError::range(2, 0));

        let too_many = Operands::new(["a", "b", "c"])
            .resolve::<2>(&mut Untouched)
            .unwrap_err();
        assert_eq!(usage(too_many), UsageError::range(2, 3));
    }

    #[test]
    fn exact_never_reads_stdin() {
        let [h, p] = Operands::new(["::1", "80"]).exact::<2>().unwrap();
        assert_eq!((h.as_str(), p.as_str()), ("::1", "80"));
        let err = Operands::new(["only"]).exact::<2>().unwrap_err();
        assert_eq!(usage(err), UsageError::exact(2, 1));
    }

    #[test]
    fn stdin_failures_propagate() {
        let err = Operands::default().resolve::<1>(&mut Failing).unwrap_err();
        assert!(err.to_string().contains("failed to read standard input"));

        let mut invalid = Cursor::new(vec![0xff, 0xfe]);
        let err = Operands::default().resolve::<1>(&mut invalid).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn output_flag_beats_env() {
        let flag = OutputArg {
            output: Some(String::new()),
        };
        assert_eq!(
            flag.format_with_env(Some("json".into())).unwrap(),
            OutputFormat::Plain
        );

        let unset = OutputArg::default();
        assert_eq!(
            unset.format_with_env(Some("json".into())).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            unset.format_with_env(Some("  ".into())).unwrap(),
            OutputFormat::Plain
        );
        assert_eq!(unset.format_with_env(None).unwrap(), OutputFormat::Plain);

        let bad = OutputArg {
            output: Some("xml".into()),
        };
        assert_eq!(
            usage(bad.format_with_env(None).unwrap_err()),
            UsageError::InvalidOutputFormat("xml".into())
        );
    }

    #[test]
    fn typed_operands() {
        assert_eq!(parse_number("-1").unwrap(), -1);
        assert_eq!(parse_number("+3").unwrap(), 3);
        assert_eq!(
            usage(parse_number("three").unwrap_err()),
            UsageError::InvalidNumber("three".into())
        );

        assert_eq!(parse_rune("é").unwrap(), 'é');
        assert_eq!(usage(parse_rune("ab").unwrap_err()), UsageError::InvalidRune);
        assert_eq!(usage(parse_rune("").unwrap_err()), UsageError::InvalidRune);
    }
}
