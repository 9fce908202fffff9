//! Per-game library action controller.
//!
//! Owns the membership/status state of one game and is the only source of
//! library writes. State changes only after the backend confirms a write;
//! a failed write leaves the last confirmed state in place.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gamebox_notify::Notifier;
use gamebox_protocol::constants::{LIBRARY_ADD_PATH, library_remove_path, library_status_path};
use gamebox_protocol::{
    AddToLibraryRequest, GameId, LibraryEntry, LibraryStatus, UpdateStatusRequest,
};
use tracing::{debug, info, warn};

use crate::error::LibraryError;
use crate::presentation::{LibraryActionView, action_view};
use crate::response;
use crate::transport::{ApiRequest, Method, Transport};

/// Client-side membership state of one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Confirmed status when `in_library`, otherwise the intended initial
    /// status for the next add.
    pub status: LibraryStatus,
    pub in_library: bool,
    /// A write is in flight; new writes are refused until it resolves.
    pub pending: bool,
}

impl ControllerState {
    /// A game the user already has, with its confirmed status.
    pub fn member(status: LibraryStatus) -> Self {
        Self {
            status,
            in_library: true,
            pending: false,
        }
    }
}

/// How a library operation resolved when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend confirmed the write; carries its message.
    Confirmed(String),
    /// No request was issued.
    Skipped(SkipReason),
    /// The response arrived after [`LibraryActionController::unmount`] and
    /// was dropped.
    Discarded,
}

/// Why an operation issued no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another write for this game is still in flight.
    Busy,
    /// Remove was asked for a game that is not in the library.
    NotInLibrary,
    /// The owning view was unmounted before the operation started.
    Unmounted,
}

#[derive(Debug)]
struct Inner {
    state: ControllerState,
    mounted: bool,
}

/// Mediates add / remove / change-status for one game.
///
/// Operations take `&self` so a view can hold the controller in an `Arc`
/// and fire actions from several event handlers; the pending guard makes
/// sure only one write per game is ever in flight.
pub struct LibraryActionController {
    game_id: GameId,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    inner: Mutex<Inner>,
}

impl LibraryActionController {
    /// A controller for a game that is not in the library.
    pub fn new(
        game_id: GameId,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_state(game_id, ControllerState::default(), transport, notifier)
    }

    /// A controller seeded from the fetched library entry for this game, if
    /// there is one.
    pub fn seeded(
        game_id: GameId,
        entry: Option<&LibraryEntry>,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = entry
            .map(|e| ControllerState::member(e.status))
            .unwrap_or_default();
        Self::with_state(game_id, state, transport, notifier)
    }

    fn with_state(
        game_id: GameId,
        state: ControllerState,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            game_id,
            transport,
            notifier,
            inner: Mutex::new(Inner {
                state: ControllerState {
                    pending: false,
                    ..state
                },
                mounted: true,
            }),
        }
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState {
        self.lock().state
    }

    /// View data for the current state.
    pub fn view(&self) -> LibraryActionView {
        action_view(&self.state())
    }

    /// The owning view is gone: a write still in flight will clear its
    /// pending flag but apply nothing and notify nobody, and later writes
    /// are skipped without a request.
    pub fn unmount(&self) {
        self.lock().mounted = false;
        debug!(game_id = %self.game_id, "controller unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Local edit of the status the next add will use. Refused while a
    /// write is in flight or once the game is in the library (use
    /// [`change_status`](Self::change_status) then).
    pub fn select_initial_status(&self, status: LibraryStatus) -> bool {
        let mut inner = self.lock();
        if inner.state.pending || inner.state.in_library {
            return false;
        }
        inner.state.status = status;
        true
    }

    /// Adds the game to the library with `status`.
    pub async fn add(&self, status: LibraryStatus) -> Result<ActionOutcome, LibraryError> {
        match self.begin(false) {
            Ok((guard, _)) => self.run_add(guard, status).await,
            Err(reason) => Ok(self.skipped(reason)),
        }
    }

    /// Removes the game from the library.
    pub async fn remove(&self) -> Result<ActionOutcome, LibraryError> {
        let guard = match self.begin(true) {
            Ok((guard, _)) => guard,
            Err(reason) => return Ok(self.skipped(reason)),
        };

        let request = ApiRequest::new(Method::Delete, library_remove_path(&self.game_id));
        self.write(guard, Ok(request), |state| {
            state.in_library = false;
            state.status = LibraryStatus::default();
        })
        .await
    }

    /// Changes the status of a library entry. For a game that is not in
    /// the library yet this is an add with `new_status`.
    pub async fn change_status(
        &self,
        new_status: LibraryStatus,
    ) -> Result<ActionOutcome, LibraryError> {
        let (guard, before) = match self.begin(false) {
            Ok(started) => started,
            Err(reason) => return Ok(self.skipped(reason)),
        };

        if !before.in_library {
            debug!(
                game_id = %self.game_id,
                status = %new_status,
                "not in library, adding instead"
            );
            return self.run_add(guard, new_status).await;
        }

        let request = ApiRequest::with_json(
            Method::Put,
            library_status_path(&self.game_id),
            &UpdateStatusRequest { status: new_status },
        )
        .map_err(LibraryError::from);
        self.write(guard, request, move |state| state.status = new_status)
            .await
    }

    async fn run_add(
        &self,
        guard: PendingGuard<'_>,
        status: LibraryStatus,
    ) -> Result<ActionOutcome, LibraryError> {
        let request = ApiRequest::with_json(
            Method::Post,
            LIBRARY_ADD_PATH,
            &AddToLibraryRequest {
                jogo_id: self.game_id.clone(),
                status,
            },
        )
        .map_err(LibraryError::from);
        self.write(guard, request, move |state| {
            state.in_library = true;
            state.status = status;
        })
        .await
    }

    /// Checks preconditions and raises the pending flag.
    ///
    /// Returns the state as it was before the flag went up.
    fn begin(
        &self,
        require_member: bool,
    ) -> Result<(PendingGuard<'_>, ControllerState), SkipReason> {
        let mut inner = self.lock();
        if !inner.mounted {
            return Err(SkipReason::Unmounted);
        }
        if inner.state.pending {
            return Err(SkipReason::Busy);
        }
        if require_member && !inner.state.in_library {
            return Err(SkipReason::NotInLibrary);
        }
        let before = inner.state;
        inner.state.pending = true;
        Ok((PendingGuard::new(self), before))
    }

    /// Sends one write and settles the state with its result.
    async fn write(
        &self,
        guard: PendingGuard<'_>,
        request: Result<ApiRequest, LibraryError>,
        apply: impl FnOnce(&mut ControllerState),
    ) -> Result<ActionOutcome, LibraryError> {
        let result = match request {
            Ok(request) => {
                debug!(
                    game_id = %self.game_id,
                    method = %request.method,
                    path = %request.path,
                    "issuing library write"
                );
                match self.transport.send(request).await {
                    Ok(resp) => response::expect_message(&resp),
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e),
        };
        self.settle(guard, result, apply)
    }

    fn settle(
        &self,
        guard: PendingGuard<'_>,
        result: Result<String, LibraryError>,
        apply: impl FnOnce(&mut ControllerState),
    ) -> Result<ActionOutcome, LibraryError> {
        guard.disarm();
        let mut inner = self.lock();
        inner.state.pending = false;

        if !inner.mounted {
            drop(inner);
            debug!(game_id = %self.game_id, "response after unmount discarded");
            return Ok(ActionOutcome::Discarded);
        }

        match result {
            Ok(message) => {
                apply(&mut inner.state);
                let state = inner.state;
                drop(inner);
                info!(
                    game_id = %self.game_id,
                    in_library = state.in_library,
                    status = %state.status,
                    "library write confirmed"
                );
                self.notifier.success(&message);
                Ok(ActionOutcome::Confirmed(message))
            }
            Err(e) => {
                drop(inner);
                warn!(game_id = %self.game_id, error = %e, "library write failed");
                self.notifier.failure(&e.user_message());
                Err(e)
            }
        }
    }

    fn skipped(&self, reason: SkipReason) -> ActionOutcome {
        debug!(game_id = %self.game_id, ?reason, "library write skipped");
        ActionOutcome::Skipped(reason)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears the pending flag if a write future is dropped before it settles.
struct PendingGuard<'a> {
    controller: &'a LibraryActionController,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(controller: &'a LibraryActionController) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.controller.lock().state.pending = false;
            debug!(
                game_id = %self.controller.game_id,
                "library write dropped before completion"
            );
        }
    }
}
