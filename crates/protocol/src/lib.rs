//! Wire types for the GameBox library API.
//!
//! Field names in this crate are the backend's wire format (`jogo_id`,
//! `mensagem`, `erro`, ...) and must not change. Rust-side names are
//! English; serde attributes carry the mapping.

pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use messages::{
    AddToLibraryRequest, ErrorResponse, LoginRequest, LoginResponse, LogoutResponse,
    MessageResponse, UpdateStatusRequest, UserInfo, UserProfile,
};
pub use types::{CatalogGame, GameId, LibraryEntry, LibraryStatus, StatusParseError};
