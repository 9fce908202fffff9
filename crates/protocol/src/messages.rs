use serde::{Deserialize, Serialize};

use crate::types::{GameId, LibraryStatus};

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/biblioteca/adicionar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToLibraryRequest {
    pub jogo_id: GameId,
    pub status: LibraryStatus,
}

/// Body of `PUT /api/biblioteca/status/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: LibraryStatus,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Success body of every library write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensagem: String,
}

/// Error body of a non-2xx response.
///
/// Library routes answer with `erro` (and the add route sometimes with
/// `mensagem`); the auth layer answers with `message`, the generic error
/// handlers with `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The most specific message the body carries.
    pub fn message(&self) -> Option<&str> {
        [&self.erro, &self.mensagem, &self.message, &self.error]
            .into_iter()
            .find_map(|field| field.as_deref())
    }
}

/// An authenticated user, as embedded in [`LoginResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Body of a `POST /api/login` response (success and failure share it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// Body of `GET /api/user_profile`.
///
/// The backend fills each field from whatever the account has, so any of
/// them may be `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserProfile {
    /// Name to greet the user with: the username, else the local part of
    /// the email.
    pub fn display_name(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.email.as_deref().and_then(|e| e.split('@').next()))
            .filter(|name| !name.is_empty())
    }
}

/// Body of a `POST /api/logout` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}
