/*!
Usage errors: problems with how a subcommand was invoked.

They are always detected before the delegate runs, so nothing has been
written to standard output when one is returned. The entry point maps them
to exit status 2; every other error exits 1.
*/

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// Operand count outside what the subcommand accepts.
    #[error("accepts {expected}, received {received}")]
    Arity { expected: String, received: usize },

    /// A count / index operand that is not an integer.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    /// A rune operand that is not exactly one character.
    #[error("invalid rune arguments")]
    InvalidRune,

    /// `--output` value other than "" or "json".
    #[error("invalid output format {0:?}")]
    InvalidOutputFormat(String),
}

impl UsageError {
    /// Arity error for a subcommand that takes exactly `n` operands.
    pub fn exact(n: usize, received: usize) -> Self {
        UsageError::Arity {
            expected: format!("{n} arg(s)"),
            received,
        }
    }

    /// Arity error for a subcommand taking `n` operands, the first optionally from stdin.
    pub fn range(n: usize, received: usize) -> Self {
        UsageError::Arity {
            expected: format!("between {} and {n} arg(s)", n - 1),
            received,
        }
    }
}

/// True when `err` (or anything in its chain) is a usage error.
pub fn is_usage(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<UsageError>())
}
