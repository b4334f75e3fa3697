use thiserror::Error;

/// Failures talking to the directory service.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service does not know the owner.
    #[error("owner not found: {0}")]
    OwnerNotFound(String),

    /// Any other non-success status, with the body as returned.
    #[error("directory service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response whose body is not a repository listing.
    #[error("invalid repository listing: {0}")]
    Decode(String),
}
