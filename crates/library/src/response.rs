//! Classification of raw responses into library outcomes.

use gamebox_protocol::{ErrorResponse, MessageResponse};
use serde::de::DeserializeOwned;

use crate::error::LibraryError;
use crate::transport::ApiResponse;

const UNAUTHORIZED: u16 = 401;

/// Success message of a library write.
pub(crate) fn expect_message(response: &ApiResponse) -> Result<String, LibraryError> {
    expect_json::<MessageResponse>(response).map(|body| body.mensagem)
}

/// Decodes a 2xx body; any other status becomes an error.
pub(crate) fn expect_json<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, LibraryError> {
    if !response.is_success() {
        return Err(rejection(response));
    }
    decode(response)
}

/// Decodes a body regardless of status.
pub(crate) fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, LibraryError> {
    serde_json::from_slice(&response.body).map_err(|e| {
        LibraryError::ConnectivityFailure(format!(
            "malformed response body (HTTP {}): {e}",
            response.status
        ))
    })
}

/// Error for a non-2xx response; 401 means the session is not logged in.
pub(crate) fn rejection(response: &ApiResponse) -> LibraryError {
    if response.status == UNAUTHORIZED {
        return LibraryError::Unauthenticated;
    }
    rejection_message(response)
}

/// Error for a non-2xx response, reading the message even on 401.
pub(crate) fn rejection_message(response: &ApiResponse) -> LibraryError {
    let status = response.status;
    match decode::<ErrorResponse>(response) {
        Ok(body) => LibraryError::ValidationRejected {
            status,
            message: body
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("server returned HTTP {status}")),
        },
        Err(e) => e,
    }
}
