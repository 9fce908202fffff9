//! Library membership state machine for the GameBox client.
//!
//! This crate decides, for one game and one user session, whether the game
//! is in the user's library and with which status, and keeps that state in
//! step with the backend while writes are in flight or fail. It has no UI
//! dependencies: views read [`LibraryActionView`] / [`LibraryPage`] values
//! and receive outcome messages through a [`gamebox_notify::Notifier`].
//!
//! # Components
//!
//! - **Controller** ([`LibraryActionController`]): per-game add, remove and
//!   status change, serialized by a pending guard.
//! - **Query** ([`LibraryQueryService`]): fetch of the full library, used to
//!   seed controllers and render the library page.
//! - **Presentation** ([`PresentationAdapter`]): pure mapping from state to
//!   view data.
//! - **Catalog** ([`CatalogService`]) and [`auth`]: the public game list and
//!   the session's login, logout and profile.
//!
//! All backend traffic goes through the [`Transport`] trait; [`HttpTransport`]
//! is the `reqwest` implementation bound to an explicit [`Session`].

pub mod auth;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod presentation;
pub mod query;
mod response;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types for convenience.
pub use catalog::CatalogService;
pub use controller::{ActionOutcome, ControllerState, LibraryActionController, SkipReason};
pub use error::{LibraryError, TransportError};
pub use presentation::{
    CatalogCard, LibraryActionView, LibraryCard, LibraryPage, PresentationAdapter,
    PresentationConfig, StatusOption, action_view,
};
pub use query::{LibraryIndex, LibraryQueryService};
pub use session::Session;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
