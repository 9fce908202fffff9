//! Pure mapping from library state to view data.
//!
//! Nothing here touches the network or holds state; every value can be
//! rebuilt from its input at any time.

use gamebox_protocol::{CatalogGame, GameId, LibraryEntry, LibraryStatus};

use crate::controller::ControllerState;
use crate::error::LibraryError;

pub const ADD_LABEL: &str = "Add to Library";
pub const REMOVE_LABEL: &str = "Remove from Library";
pub const ADDING_LABEL: &str = "Adding…";
pub const REMOVING_LABEL: &str = "Removing…";

pub const EMPTY_LIBRARY_MESSAGE: &str = "Your library is empty. Add some games!";

/// Shown where a year or platform list is missing.
const MISSING: &str = "—";

/// One entry of the status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    pub status: LibraryStatus,
    pub wire: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// What the per-game action UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryActionView {
    pub selected_status: LibraryStatus,
    pub is_member: bool,
    pub action_label: &'static str,
    /// Selector and button are both disabled while a write is in flight.
    pub disabled: bool,
    pub options: Vec<StatusOption>,
}

/// Maps controller state to the action UI.
///
/// While pending, the label names the action the button stands for: a
/// member's button removes, a non-member's adds.
pub fn action_view(state: &ControllerState) -> LibraryActionView {
    let action_label = match (state.pending, state.in_library) {
        (true, true) => REMOVING_LABEL,
        (true, false) => ADDING_LABEL,
        (false, true) => REMOVE_LABEL,
        (false, false) => ADD_LABEL,
    };

    LibraryActionView {
        selected_status: state.status,
        is_member: state.in_library,
        action_label,
        disabled: state.pending,
        options: LibraryStatus::ALL
            .into_iter()
            .map(|status| StatusOption {
                status,
                wire: status.as_wire(),
                label: status.label(),
                selected: status == state.status,
            })
            .collect(),
    }
}

/// Settings that differ between hosting views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationConfig {
    /// Cover shown for games without an image.
    pub fallback_image: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            fallback_image: "img/persona.png".into(),
        }
    }
}

/// One game on the library page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCard {
    pub game_id: GameId,
    pub title: String,
    pub status: LibraryStatus,
    pub status_label: &'static str,
    pub image: String,
    pub release: String,
    pub platforms: Vec<String>,
    /// `dd/mm/yyyy`.
    pub added_on: Option<String>,
}

/// One game in the catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCard {
    pub game_id: GameId,
    pub title: String,
    pub image: String,
    pub release: String,
    pub platforms: Vec<String>,
    /// Average rating with one decimal, or `—` when unrated.
    pub rating: String,
    /// The user's status for this game, when it is in their library.
    pub library_status: Option<LibraryStatus>,
}

/// The library page for one fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryPage {
    Loaded(Vec<LibraryCard>),
    Empty,
    /// The session is not logged in; the view should offer to log in.
    LoginRequired,
    Failed(String),
}

impl LibraryPage {
    /// Text to show instead of the card list, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            LibraryPage::Loaded(_) => None,
            LibraryPage::Empty => Some(EMPTY_LIBRARY_MESSAGE.to_owned()),
            LibraryPage::LoginRequired => Some(LibraryError::Unauthenticated.user_message()),
            LibraryPage::Failed(message) => Some(message.clone()),
        }
    }
}

/// Renders library data with one [`PresentationConfig`].
#[derive(Debug, Clone, Default)]
pub struct PresentationAdapter {
    config: PresentationConfig,
}

impl PresentationAdapter {
    pub fn new(config: PresentationConfig) -> Self {
        Self { config }
    }

    pub fn action_view(&self, state: &ControllerState) -> LibraryActionView {
        action_view(state)
    }

    pub fn card(&self, entry: &LibraryEntry) -> LibraryCard {
        LibraryCard {
            game_id: entry.game_id.clone(),
            title: entry.name.clone(),
            status: entry.status,
            status_label: entry.status.label(),
            image: self.image(entry.image_url.as_deref()),
            release: release(entry.release_year),
            platforms: split_platforms(entry.platforms.as_deref().unwrap_or_default()),
            added_on: entry
                .added_at
                .map(|at| at.format("%d/%m/%Y").to_string()),
        }
    }

    /// A catalog card; `library_status` marks games already in the library.
    pub fn catalog_card(
        &self,
        game: &CatalogGame,
        library_status: Option<LibraryStatus>,
    ) -> CatalogCard {
        CatalogCard {
            game_id: game.game_id.clone(),
            title: game.name.clone(),
            image: self.image(game.image_url.as_deref()),
            release: release(game.release_year),
            platforms: split_platforms(game.platforms.as_deref().unwrap_or_default()),
            rating: game
                .rating
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| MISSING.to_owned()),
            library_status,
        }
    }

    fn image(&self, url: Option<&str>) -> String {
        url.map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.config.fallback_image)
            .to_owned()
    }

    pub fn page(&self, fetched: &Result<Vec<LibraryEntry>, LibraryError>) -> LibraryPage {
        match fetched {
            Ok(entries) if entries.is_empty() => LibraryPage::Empty,
            Ok(entries) => LibraryPage::Loaded(entries.iter().map(|e| self.card(e)).collect()),
            Err(LibraryError::Unauthenticated) => LibraryPage::LoginRequired,
            Err(e) => LibraryPage::Failed(e.user_message()),
        }
    }
}

fn release(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| MISSING.to_owned())
}

/// Splits `"PC, PS4"` into `["PC", "PS4"]`, dropping empty pieces.
pub fn split_platforms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Platforms joined for single-line display.
pub fn platforms_line(platforms: &[String]) -> String {
    if platforms.is_empty() {
        MISSING.to_owned()
    } else {
        platforms.join(", ")
    }
}
