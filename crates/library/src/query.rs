//! Read-only fetch of the session's library.

use std::collections::HashMap;
use std::sync::Arc;

use gamebox_notify::Notifier;
use gamebox_protocol::constants::LIBRARY_PATH;
use gamebox_protocol::{GameId, LibraryEntry, LibraryStatus};
use tracing::{debug, warn};

use crate::controller::LibraryActionController;
use crate::error::LibraryError;
use crate::response;
use crate::transport::{ApiRequest, Method, Transport};

/// Fetches the library of whichever session the transport is bound to.
#[derive(Clone)]
pub struct LibraryQueryService {
    transport: Arc<dyn Transport>,
}

impl LibraryQueryService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// All entries, in server response order. Never retries.
    pub async fn fetch_all(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        let response = self
            .transport
            .send(ApiRequest::new(Method::Get, LIBRARY_PATH))
            .await
            .map_err(|e| {
                warn!(error = %e, "library fetch failed");
                LibraryError::from(e)
            })?;

        match response::expect_json::<Vec<LibraryEntry>>(&response) {
            Ok(entries) => {
                debug!(count = entries.len(), "library fetched");
                Ok(entries)
            }
            Err(e) => {
                warn!(status = response.status, error = %e, "library fetch rejected");
                Err(e)
            }
        }
    }

    /// [`fetch_all`](Self::fetch_all) folded into a [`LibraryIndex`].
    pub async fn fetch_index(&self) -> Result<LibraryIndex, LibraryError> {
        self.fetch_all().await.map(LibraryIndex::from_entries)
    }
}

/// Fetched entries keyed by game id, keeping server order.
///
/// If the server lists a game twice, lookups see the later entry.
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    entries: Vec<LibraryEntry>,
    positions: HashMap<GameId, usize>,
}

impl LibraryIndex {
    pub fn from_entries(entries: Vec<LibraryEntry>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.game_id.clone(), i))
            .collect();
        Self { entries, positions }
    }

    pub fn get(&self, game_id: &GameId) -> Option<&LibraryEntry> {
        self.positions.get(game_id).map(|&i| &self.entries[i])
    }

    pub fn status_of(&self, game_id: &GameId) -> Option<LibraryStatus> {
        self.get(game_id).map(|e| e.status)
    }

    pub fn contains(&self, game_id: &GameId) -> bool {
        self.positions.contains_key(game_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A controller for `game_id`, seeded as a member when the index has it.
    pub fn controller_for(
        &self,
        game_id: GameId,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> LibraryActionController {
        let entry = self.get(&game_id);
        LibraryActionController::seeded(game_id, entry, transport, notifier)
    }
}
