use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::types::GameId;

/// Lists the session's library (GET).
pub const LIBRARY_PATH: &str = "/api/biblioteca";

/// Adds a game to the library (POST `{ jogo_id, status }`).
pub const LIBRARY_ADD_PATH: &str = "/api/biblioteca/adicionar";

/// Starts a session (POST `{ email, senha }`).
pub const LOGIN_PATH: &str = "/api/login";

/// Ends the current session (POST, no body).
pub const LOGOUT_PATH: &str = "/api/logout";

/// Public catalog of games (GET).
pub const CATALOG_PATH: &str = "/api/jogos";

/// Profile of the logged-in user (GET).
pub const USER_PROFILE_PATH: &str = "/api/user_profile";

/// Catalog games whose name contains `term`, case-insensitively (GET).
pub fn catalog_search_path(term: &str) -> String {
    format!(
        "/api/jogos/pesquisa?q={}",
        utf8_percent_encode(term, NON_ALPHANUMERIC)
    )
}

/// Removes a game from the library (DELETE).
pub fn library_remove_path(game_id: &GameId) -> String {
    format!("/api/biblioteca/remover/{}", encode_segment(game_id))
}

/// Updates the status of a library entry (PUT `{ status }`).
pub fn library_status_path(game_id: &GameId) -> String {
    format!("/api/biblioteca/status/{}", encode_segment(game_id))
}

fn encode_segment(game_id: &GameId) -> String {
    utf8_percent_encode(game_id.as_str(), NON_ALPHANUMERIC).to_string()
}
