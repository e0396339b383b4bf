use thiserror::Error;

pub type PageResult<T> = Result<T, PageError>;

/// Errors raised while composing or serializing a page.
///
/// All of these are unrecoverable for the current render: the calling layer is
/// expected to turn them into an error page, never to retry or partially render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid tag '{tag}': not in the allowed element set")]
    InvalidTag { tag: String },

    #[error("Document has already been serialized; no further mutation is allowed")]
    UseAfterFinalize,

    #[error("Missing required data for {widget}: {reason}")]
    MissingRequiredData { widget: String, reason: String },

    #[error("Required parameter missing: {name}")]
    MissingParameter { name: String },

    #[error("Invalid parameter value: {name}={value}")]
    InvalidParameter { name: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
