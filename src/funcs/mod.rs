//! Delegates: the library functions each subcommand exposes.
//!
//! One module per subcommand group. Functions take and return plain
//! strings / numbers; anything fallible returns `anyhow::Result`.

pub mod net;
pub mod path;
pub mod strings;
pub mod url;
