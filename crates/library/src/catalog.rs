//! Read-only access to the public game catalog.

use std::sync::Arc;

use gamebox_protocol::CatalogGame;
use gamebox_protocol::constants::{CATALOG_PATH, catalog_search_path};
use tracing::{debug, warn};

use crate::error::LibraryError;
use crate::response;
use crate::transport::{ApiRequest, Method, Transport};

/// Lists and searches catalog games. Needs no login.
#[derive(Clone)]
pub struct CatalogService {
    transport: Arc<dyn Transport>,
}

impl CatalogService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Every catalog game, in server order.
    pub async fn list(&self) -> Result<Vec<CatalogGame>, LibraryError> {
        self.fetch(CATALOG_PATH.to_owned()).await
    }

    /// Games whose name contains `term`. A blank term lists everything.
    pub async fn search(&self, term: &str) -> Result<Vec<CatalogGame>, LibraryError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list().await;
        }
        self.fetch(catalog_search_path(term)).await
    }

    async fn fetch(&self, path: String) -> Result<Vec<CatalogGame>, LibraryError> {
        let response = self
            .transport
            .send(ApiRequest::new(Method::Get, path.as_str()))
            .await
            .map_err(|e| {
                warn!(%path, error = %e, "catalog fetch failed");
                LibraryError::from(e)
            })?;

        let games = response::expect_json::<Vec<CatalogGame>>(&response).inspect_err(|e| {
            warn!(%path, status = response.status, error = %e, "catalog fetch rejected");
        })?;
        debug!(%path, count = games.len(), "catalog fetched");
        Ok(games)
    }
}
