//! Error types for library operations.

/// What the user reads when the backend could not be reached.
pub const CONNECTIVITY_MESSAGE: &str = "Could not connect to the server.";

/// What the user reads when the session is not logged in.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You need to log in to manage your library.";

/// Failure of a library read or write.
///
/// Every variant is terminal for the invocation that produced it; nothing in
/// this crate retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    /// Non-2xx response carrying a decodable error body.
    #[error("rejected by server (HTTP {status}): {message}")]
    ValidationRejected { status: u16, message: String },

    /// No response, or a body that failed to decode.
    #[error("connectivity failure: {0}")]
    ConnectivityFailure(String),

    /// HTTP 401: the session is not logged in.
    #[error("session is not authenticated")]
    Unauthenticated,
}

impl LibraryError {
    /// Text for the notification side channel.
    ///
    /// Server rejections are shown verbatim; transport detail stays in the
    /// logs.
    pub fn user_message(&self) -> String {
        match self {
            LibraryError::ValidationRejected { message, .. } => message.clone(),
            LibraryError::ConnectivityFailure(_) => CONNECTIVITY_MESSAGE.to_owned(),
            LibraryError::Unauthenticated => LOGIN_REQUIRED_MESSAGE.to_owned(),
        }
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for LibraryError {
    fn from(e: TransportError) -> Self {
        LibraryError::ConnectivityFailure(e.0)
    }
}
