use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LazyError {
    /// A text cell without an evaluation step of its own was read.
    #[error("`{0}` does not implement its evaluation step")]
    Unimplemented(&'static str),
    #[error("lazy value is not valid text: {0}")]
    Decode(#[from] Utf8Error),
    /// The rendering collaborator failed; its error is the source.
    #[error("could not render query")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("malformed table reference `{table}`: {reason}")]
    MalformedTable { table: String, reason: &'static str },
}
