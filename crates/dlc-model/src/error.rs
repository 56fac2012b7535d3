use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid container identifier `{raw}`: {reason}")]
    InvalidIdentifier { raw: String, reason: String },

    #[error("unknown level `{0}` (expected Collection, Class, Series, File or Item)")]
    UnknownLevel(String),
}
