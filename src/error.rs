//! Errors reported by tree operations and the command harness

extern crate alloc;

use alloc::{collections::TryReserveError, string::String};
use core::{fmt, num::ParseIntError};

/// Result type for this crate
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by tree operations and the command harness
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `split_key` was given a key that is not in the tree
    #[error("no element with the requested key to split at")]
    KeyNotFound,

    /// The trees passed to a merge do not have separated key ranges
    #[error("keys of the merged tree must all follow the keys of this tree")]
    MergeOrder,

    /// Storage for a new node could not be allocated
    #[error("unable to allocate storage for a tree node")]
    Alloc(#[from] TryReserveError),

    /// The harness read a command it does not know
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// The harness read a command without its argument
    #[error("command '{0}' expects an integer argument")]
    MissingArgument(String),

    /// The harness read an argument that is not an integer
    #[error("invalid integer argument")]
    InvalidArgument(#[from] ParseIntError),

    /// Output of the harness could not be written
    #[error("unable to write command output")]
    Format(#[from] fmt::Error),
}
