/*!
`url.rs`

The `url` subcommand group: percent-encoding and URL parsing.

  shellfn url queryescape "a b&c"        -> a+b%26c
  shellfn url pathunescape a%20b         -> a b
  shellfn url parse https://u@h:8/p?q#f  -> {"scheme":"https",...}
*/

use anyhow::Result;
use clap::Subcommand;
use std::io::Read;

use crate::cmd::format::{Outcome, Reply};
use crate::cmd::shared::Operands;
use crate::funcs::url as f;
use crate::log_debug;

#[derive(Subcommand, Debug)]
#[command(rename_all = "lower")]
pub enum UrlCommand {
    /// Escape S for use as a URL path segment: [S]
    PathEscape(Operands),
    /// Reverse of pathescape: [S]
    PathUnescape(Operands),
    /// Escape S for use in a URL query: [S]
    QueryEscape(Operands),
    /// Reverse of queryescape: [S]
    QueryUnescape(Operands),
    /// Components of a URL or relative reference, as JSON: [URL]
    Parse(Operands),
}

pub fn execute_url(cmd: UrlCommand, stdin: &mut dyn Read) -> Result<Reply> {
    use UrlCommand::*;
    log_debug!("url: {cmd:?}");

    let reply = match cmd {
        PathEscape(ops) => {
            let [s] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::path_escape(&s))
        }
        PathUnescape(ops) => {
            let [s] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::path_unescape(&s)?)
        }
        QueryEscape(ops) => {
            let [s] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::query_escape(&s))
        }
        QueryUnescape(ops) => {
            let [s] = ops.resolve::<1>(stdin)?;
            Reply::plain(f::query_unescape(&s)?)
        }
        Parse(ops) => {
            let [raw] = ops.resolve::<1>(stdin)?;
            let parts = f::parse(&raw)?;
            Reply::plain(Outcome::Document(serde_json::to_value(parts)?))
        }
    };
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn escape_from_stdin() {
        let reply = execute_url(UrlCommand::QueryEscape(Operands::default()), &mut Cursor::new("a b&c")).unwrap();
        assert_eq!(reply, Reply::plain("a+b%26c"));
    }

    #[test]
    fn bad_escape_is_an_error() {
        let err = execute_url(
            UrlCommand::PathUnescape(Operands::new(["100%zz"])),
            &mut Cursor::new(""),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid URL escape \"%zz\"");
    }

    #[test]
    fn unescape_replies_with_raw_bytes() {
        let reply = execute_url(UrlCommand::PathUnescape(Operands::new(["%FFok"])), &mut Cursor::new("")).unwrap();
        assert_eq!(reply, Reply::plain(vec![0xff, b'o', b'k']));
    }

    #[test]
    fn parse_relative_reference() {
        let reply = execute_url(UrlCommand::Parse(Operands::default()), &mut Cursor::new("/a/b?x=1")).unwrap();
        let Outcome::Document(doc) = reply.outcome else {
            panic!("expected a document");
        };
        assert_eq!(doc["scheme"], "");
        assert_eq!(doc["host"], serde_json::Value::Null);
        assert_eq!(doc["path"], "/a/b");
        assert_eq!(doc["query"], "x=1");
    }

    #[test]
    fn parse_is_a_document() {
        let reply = execute_url(
            UrlCommand::Parse(Operands::new(["https://user:pw@example.com:8443/a/b?x=1#top"])),
            &mut Cursor::new(""),
        )
        .unwrap();
        assert_eq!(
            reply.outcome,
            Outcome::Document(json!({
                "scheme": "https",
                "username": "user",
                "password": "pw",
                "host": "example.com",
                "port": 8443,
                "path": "/a/b",
                "query": "x=1",
                "fragment": "top",
            }))
        );
    }
}
