//! URL delegates: percent escaping for path segments and query components,
//! and URL parsing into a serializable breakdown.

use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use url::{ParseError, Url};

/// Query components keep only the unreserved characters.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path segments additionally keep sub-delimiters that cannot end a segment.
const PATH_SEGMENT: &AsciiSet = &QUERY_COMPONENT
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

pub fn path_escape(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

pub fn query_escape(s: &str) -> String {
    // '%' itself is escaped, so every "%20" here came from a space.
    utf8_percent_encode(s, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Decoded bytes of `s`. Escapes may decode to bytes that are not UTF-8;
/// they are returned as-is.
pub fn path_unescape(s: &str) -> Result<Vec<u8>> {
    check_escapes(s)?;
    Ok(percent_decode_str(s).collect())
}

pub fn query_unescape(s: &str) -> Result<Vec<u8>> {
    check_escapes(s)?;
    let spaced = s.replace('+', " ");
    Ok(percent_decode_str(&spaced).collect())
}

// Every '%' must be followed by two hex digits.
fn check_escapes(s: &str) -> Result<()> {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            let end = (i + 3).min(bytes.len());
            bail!(
                "invalid URL escape {:?}",
                String::from_utf8_lossy(&bytes[i..end])
            );
        }
    }
    Ok(())
}

/// The parts of a parsed URL, as emitted by `url parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub scheme: String,
    pub username: String,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl From<&Url> for UrlParts {
    fn from(url: &Url) -> Self {
        UrlParts {
            scheme: url.scheme().to_string(),
            username: url.username().to_string(),
            password: url.password().map(str::to_string),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        }
    }
}

/// Parse an absolute URL or a relative reference. A relative reference has
/// an empty scheme and, unless it starts with `//`, no authority.
pub fn parse(raw: &str) -> Result<UrlParts> {
    match Url::parse(raw) {
        Ok(url) => Ok(UrlParts::from(&url)),
        Err(ParseError::RelativeUrlWithoutBase) => parse_relative(raw),
        Err(err) => Err(err).with_context(|| format!("parse {raw:?}")),
    }
}

// Non-special, so no default port is elided from the authority.
const AUTHORITY_SCHEME: &str = "relative";

fn parse_relative(raw: &str) -> Result<UrlParts> {
    if raw.starts_with("//") {
        let url = Url::parse(&format!("{AUTHORITY_SCHEME}:{raw}"))
            .with_context(|| format!("parse {raw:?}"))?;
        return Ok(UrlParts {
            scheme: String::new(),
            ..UrlParts::from(&url)
        });
    }

    let (rest, fragment) = match raw.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment.to_string())),
        None => (raw, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (rest, None),
    };
    let first_segment = path.split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        bail!("parse {raw:?}: first path segment in URL cannot contain colon");
    }

    Ok(UrlParts {
        scheme: String::new(),
        username: String::new(),
        password: None,
        host: None,
        port: None,
        path: path.to_string(),
        query,
        fragment,
    })
}
