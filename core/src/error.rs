use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MutateErr>;

#[derive(Error, Debug)]
pub enum MutateErr {
    /// Entry names key the registry; an empty one would be unaddressable.
    #[error("entry name must not be empty")]
    EmptyName,

    /// The command is only validated for non-emptiness; whether it exists
    /// on disk is the host application's problem at launch time.
    #[error("entry command must not be empty")]
    EmptyCommand,

    /// Directory creation, copy, read, or write failure. Inside a
    /// transaction this triggers backup restoration before it surfaces.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The document could not be parsed as JSON. The file is owned by the
    /// host application, so we surface this instead of rewriting it.
    #[error("configuration file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed, but its top level is not a JSON object.
    #[error("configuration file root is not a JSON object")]
    NotAnObject,
}
