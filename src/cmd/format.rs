/*!
format.rs

Rendering of delegate results to standard output.

Result kinds (`Outcome`):
  - Text / Number : written verbatim, no newline added
  - Bytes         : raw bytes that need not be UTF-8 (decoded escapes), verbatim
  - Predicate     : nothing written; true -> exit 0, false -> exit 1
  - List          : plain = one item per line; json = array + newline
  - Record        : plain = one value per line; json = object (field order kept) + newline
  - Document      : always json + newline

Output formats (`OutputFormat`):
  ""   / unset -> Plain
  "json"       -> Json
  anything else is a usage error, raised before the delegate is called.

Only list and record subcommands carry an `--output` option; everything
else is rendered with `OutputFormat::Plain`.
*/

use anyhow::{Context, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::io::{self, Write};
use std::process::ExitCode;

use crate::cmd::usage::UsageError;

/* ---- Output Format ---- */

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self, UsageError> {
        match raw {
            "" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(UsageError::InvalidOutputFormat(other.to_string())),
        }
    }
}

/* ---- Outcome ---- */

/// What a delegate produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Text(String),
    Bytes(Vec<u8>),
    Number(i64),
    Predicate(bool),
    List(Vec<String>),
    /// Named fields, rendered in the given order.
    Record(Vec<(&'static str, String)>),
    Document(serde_json::Value),
}

impl From<&str> for Outcome {
    fn from(s: &str) -> Self {
        Outcome::Text(s.to_string())
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        Outcome::Text(s)
    }
}

impl From<Vec<u8>> for Outcome {
    fn from(bytes: Vec<u8>) -> Self {
        Outcome::Bytes(bytes)
    }
}

impl From<i64> for Outcome {
    fn from(n: i64) -> Self {
        Outcome::Number(n)
    }
}

impl From<usize> for Outcome {
    fn from(n: usize) -> Self {
        Outcome::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Outcome {
    fn from(b: bool) -> Self {
        Outcome::Predicate(b)
    }
}

impl From<Vec<String>> for Outcome {
    fn from(items: Vec<String>) -> Self {
        Outcome::List(items)
    }
}

struct OrderedRecord<'a>(&'a [(&'static str, String)]);

impl Serialize for OrderedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/* ---- Reply / Status ---- */

/// A delegate outcome paired with the format it must be rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub outcome: Outcome,
    pub format: OutputFormat,
}

impl Reply {
    pub fn new(outcome: impl Into<Outcome>, format: OutputFormat) -> Self {
        Reply {
            outcome: outcome.into(),
            format,
        }
    }

    pub fn plain(outcome: impl Into<Outcome>) -> Self {
        Reply::new(outcome, OutputFormat::Plain)
    }
}

/// Process-level outcome of a successful invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// A predicate evaluated to false.
    False,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::False => ExitCode::from(1),
        }
    }
}

/* ---- Rendering ---- */

/// Write `reply` to `out`. A closed pipe on the reading side is not an error.
pub fn render(reply: &Reply, out: &mut dyn Write) -> Result<Status> {
    match write_reply(reply, out) {
        Ok(status) => Ok(status),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(status_of(&reply.outcome)),
        Err(e) => Err(e).context("write stdout"),
    }
}

fn status_of(outcome: &Outcome) -> Status {
    match outcome {
        Outcome::Predicate(false) => Status::False,
        _ => Status::Success,
    }
}

fn write_reply(reply: &Reply, out: &mut dyn Write) -> io::Result<Status> {
    match (&reply.outcome, reply.format) {
        (Outcome::Predicate(_), _) => {}
        (Outcome::Text(s), _) => write!(out, "{s}")?,
        (Outcome::Bytes(bytes), _) => out.write_all(bytes)?,
        (Outcome::Number(n), _) => write!(out, "{n}")?,
        (Outcome::List(items), OutputFormat::Plain) => {
            for item in items {
                writeln!(out, "{item}")?;
            }
        }
        (Outcome::List(items), OutputFormat::Json) => write_json(out, items)?,
        (Outcome::Record(fields), OutputFormat::Plain) => {
            for (_, value) in fields {
                writeln!(out, "{value}")?;
            }
        }
        (Outcome::Record(fields), OutputFormat::Json) => write_json(out, &OrderedRecord(fields))?,
        (Outcome::Document(doc), _) => write_json(out, doc)?,
    }
    out.flush()?;
    Ok(status_of(&reply.outcome))
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

/* ---- Tests ---- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rendered(reply: Reply) -> (String, Status) {
        let mut buf = Vec::new();
        let status = render(&reply, &mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), status)
    }

    fn list(items: &[&str]) -> Outcome {
        Outcome::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn parse_output_format() {
        assert_eq!(OutputFormat::parse("").unwrap(), OutputFormat::Plain);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::parse("yaml").unwrap_err(),
            UsageError::InvalidOutputFormat("yaml".into())
        );
        assert!(OutputFormat::parse("JSON").is_err(), "format names are case-sensitive");
    }

    #[test]
    fn scalars_have_no_trailing_newline() {
        assert_eq!(rendered(Reply::plain("hello")), ("hello".into(), Status::Success));
        assert_eq!(rendered(Reply::plain(-1i64)), ("-1".into(), Status::Success));
        assert_eq!(rendered(Reply::plain("line\n")).0, "line\n", "content is verbatim");
    }

    #[test]
    fn bytes_are_written_untouched() {
        let mut buf = Vec::new();
        let status = render(&Reply::plain(vec![b'a', 0xff, 0xc3]), &mut buf).unwrap();
        assert_eq!(status, Status::Success);
        assert_eq!(buf, [b'a', 0xff, 0xc3]);
    }

    #[test]
    fn predicates_write_nothing() {
        assert_eq!(rendered(Reply::plain(true)), (String::new(), Status::Success));
        assert_eq!(rendered(Reply::plain(false)), (String::new(), Status::False));
    }

    #[test]
    fn plain_list_is_one_line_per_item() {
        let (out, _) = rendered(Reply::plain(list(&["a", "b", "", "c"])));
        assert_eq!(out, "a\nb\n\nc\n");
        let (out, _) = rendered(Reply::plain(list(&[])));
        assert_eq!(out, "");
    }

    #[test]
    fn json_list_is_array_plus_newline() {
        let (out, _) = rendered(Reply::new(list(&["a", "b", "c"]), OutputFormat::Json));
        assert_eq!(out, "[\"a\",\"b\",\"c\"]\n");
        let (out, _) = rendered(Reply::new(list(&[]), OutputFormat::Json));
        assert_eq!(out, "[]\n");
    }

    #[test]
    fn record_keeps_field_order() {
        let record = Outcome::Record(vec![("ip", "192.0.2.1".into()), ("network", "192.0.2.0/24".into())]);
        let (plain, _) = rendered(Reply::plain(record.clone()));
        assert_eq!(plain, "192.0.2.1\n192.0.2.0/24\n");

        let (out, _) = rendered(Reply::new(
            Outcome::Record(vec![("file", "b".into()), ("dir", "a/".into())]),
            OutputFormat::Json,
        ));
        assert_eq!(out, "{\"file\":\"b\",\"dir\":\"a/\"}\n");
    }

    #[test]
    fn document_is_always_json() {
        let (out, _) = rendered(Reply::plain(Outcome::Document(json!({"scheme":"https"}))));
        assert_eq!(out, "{\"scheme\":\"https\"}\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        let status = render(&Reply::plain(list(&["a"])), &mut ClosedPipe).unwrap();
        assert_eq!(status, Status::Success);
    }
}
