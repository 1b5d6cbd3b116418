//! Path delegates.
//!
//! Everything except `abs`, `eval_symlinks` and `glob` is purely lexical:
//! paths are `/`-separated strings and lists are `:`-separated.

use anyhow::{Context, Result, bail};
use std::path::Path;

pub const SEPARATOR: char = '/';
pub const LIST_SEPARATOR: char = ':';

/// Shortest path equivalent to `path` by lexical processing alone.
///
/// Repeated separators collapse, `.` elements vanish, inner `..` elements
/// cancel the element before them and `..` directly under the root is dropped.
/// An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let rooted = path.starts_with(SEPARATOR);

    let mut parts: Vec<&str> = Vec::new();
    for elem in path.split(SEPARATOR) {
        match elem {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(elem),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("{SEPARATOR}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

pub fn is_abs(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Absolute form of `path`, joined with the working directory when relative.
pub fn abs(path: &str) -> Result<String> {
    if is_abs(path) {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    Ok(clean(&format!("{}{SEPARATOR}{path}", cwd.display())))
}

/// Last element of `path`, ignoring trailing separators.
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return SEPARATOR.to_string();
    }
    match trimmed.rfind(SEPARATOR) {
        Some(i) => trimmed[i + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Everything but the last element, cleaned.
pub fn dir(path: &str) -> String {
    let head = match path.rfind(SEPARATOR) {
        Some(i) => &path[..=i],
        None => "",
    };
    clean(head)
}

/// Extension of the final element including the dot, or "".
pub fn ext(path: &str) -> &str {
    for (i, c) in path.char_indices().rev() {
        if c == SEPARATOR {
            break;
        }
        if c == '.' {
            return &path[i..];
        }
    }
    ""
}

/// Split after the final separator; `dir + file == path`.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    }
}

pub fn split_list(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(LIST_SEPARATOR).map(str::to_string).collect()
}

/// Relative path that reaches `targpath` from `basepath`, lexically.
pub fn rel(basepath: &str, targpath: &str) -> Result<String> {
    let base = clean(basepath);
    let targ = clean(targpath);
    if base == targ {
        return Ok(".".to_string());
    }
    let base = if base == "." { String::new() } else { base };
    if is_abs(&base) != is_abs(&targ) {
        bail!("Rel: can't make {targpath} relative to {basepath}");
    }

    let base_parts = components(&base);
    let targ_parts = components(&targ);
    let common = base_parts
        .iter()
        .zip(&targ_parts)
        .take_while(|(b, t)| b == t)
        .count();

    let base_rest = &base_parts[common..];
    let targ_rest = &targ_parts[common..];
    if base_rest.first() == Some(&"..") {
        bail!("Rel: can't make {targpath} relative to {basepath}");
    }
    if base_rest.is_empty() {
        return Ok(targ_rest.join("/"));
    }

    let mut out = vec![".."; base_rest.len()];
    out.extend_from_slice(targ_rest);
    Ok(out.join("/"))
}

fn components(cleaned: &str) -> Vec<&str> {
    let rest = cleaned.trim_start_matches(SEPARATOR);
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split(SEPARATOR).collect()
}

/// Resolve symbolic links. Relative input gives a result relative to the
/// working directory, with `..` elements when it resolves outside of it.
pub fn eval_symlinks(path: &str) -> Result<String> {
    let resolved = display(&std::fs::canonicalize(path).with_context(|| format!("lstat {path}"))?);
    if is_abs(path) {
        return Ok(resolved);
    }
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    Ok(relative_to(&display(&cwd), &resolved))
}

// Both arguments are absolute and clean, so `rel` has nothing to reject.
fn relative_to(cwd: &str, resolved: &str) -> String {
    rel(cwd, resolved).unwrap_or_else(|_| resolved.to_string())
}

/// Paths matching `pattern`, in lexical order. A malformed pattern is the only error;
/// unreadable directories are skipped.
pub fn glob(pattern: &str) -> Result<Vec<String>> {
    let entries =
        glob::glob(pattern).with_context(|| format!("syntax error in pattern {pattern:?}"))?;
    Ok(entries
        .filter_map(|entry| entry.ok())
        .map(|p: std::path::PathBuf| display(&p))
        .collect())
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_lexical_rules() {
        let cases = [
            ("", "."),
            ("abc", "abc"),
            ("abc/def/", "abc/def"),
            ("a//c", "a/c"),
            ("abc/./def", "abc/def"),
            ("/./abc/def", "/abc/def"),
            ("abc/def/../ghi/../jkl", "abc/jkl"),
            ("abc/../../././../def", "../../def"),
            ("/../abc", "/abc"),
            ("/", "/"),
            ("..", ".."),
            ("a/..", "."),
        ];
        for (input, want) in cases {
            assert_eq!(clean(input), want, "clean({input:?})");
        }
    }

    #[test]
    fn base_and_dir() {
        assert_eq!(base("/a/b/"), "b");
        assert_eq!(base(""), ".");
        assert_eq!(base("///"), "/");
        assert_eq!(base("file.go"), "file.go");
        assert_eq!(dir("/a/b/c"), "/a/b");
        assert_eq!(dir("a/b/"), "a/b");
        assert_eq!(dir("file"), ".");
        assert_eq!(dir("/"), "/");
        assert_eq!(dir(""), ".");
    }

    #[test]
    fn ext_of_final_element() {
        assert_eq!(ext("index.js"), ".js");
        assert_eq!(ext("main.test.js"), ".js");
        assert_eq!(ext("a.d/b"), "");
        assert_eq!(ext("noext"), "");
    }

    #[test]
    fn split_preserves_concatenation() {
        assert_eq!(split("static/myfile.css"), ("static/", "myfile.css"));
        assert_eq!(split("myfile.css"), ("", "myfile.css"));
        assert_eq!(split("/usr/"), ("/usr/", ""));
    }

    #[test]
    fn split_list_edges() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("/usr/bin"), vec!["/usr/bin"]);
        assert_eq!(split_list("/a:/b::/c"), vec!["/a", "/b", "", "/c"]);
    }

    #[test]
    fn rel_lexical() {
        assert_eq!(rel("/a", "/a/b/c").unwrap(), "b/c");
        assert_eq!(rel("/a", "/b/c").unwrap(), "../b/c");
        assert_eq!(rel("/a/b", "/a/b").unwrap(), ".");
        assert_eq!(rel("/", "/a").unwrap(), "a");
        assert_eq!(rel(".", "a/b").unwrap(), "a/b");
        assert_eq!(rel("a/b", "a").unwrap(), "..");
        assert!(rel("/a", "./b/c").is_err());
        assert!(rel("..", "a").is_err());
    }

    #[test]
    fn abs_keeps_absolute_input() {
        assert_eq!(abs("/x/../y/").unwrap(), "/y");
        assert!(is_abs(&abs("relative/dir").unwrap()));
    }

    #[test]
    fn glob_lists_matches_and_rejects_bad_patterns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("c.md"), "").unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        let found = glob(&pattern).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("a.txt"));
        assert!(found[1].ends_with("b.txt"));

        assert!(glob("[").is_err());
        assert!(glob(&format!("{}/*.none", dir.path().display())).unwrap().is_empty());
    }

    #[test]
    fn resolved_paths_are_shown_relative_to_cwd() {
        assert_eq!(relative_to("/home/u/proj", "/home/u/proj/src/lib.rs"), "src/lib.rs");
        assert_eq!(relative_to("/home/u/proj", "/home/u/other/x"), "../other/x");
        assert_eq!(relative_to("/home/u/proj", "/home/u/proj"), ".");
        assert_eq!(relative_to("/", "/etc/hosts"), "etc/hosts");
    }

    #[cfg(unix)]
    #[test]
    fn eval_symlinks_follows_links() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let resolved = eval_symlinks(&link.display().to_string()).unwrap();
        assert!(resolved.ends_with("/target"));
        assert!(eval_symlinks("/definitely/not/here").is_err());
    }
}
