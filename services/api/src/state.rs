//! Application state shared across handlers

use anyhow::Result;

use crate::{
    config::ServerConfig,
    repositories::{
        SessionRepository, UserRepository,
        catalog::{CatalogRepository, EntitlementRepository},
    },
    seed,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub session_repository: SessionRepository,
    pub catalog_repository: CatalogRepository,
    pub entitlement_repository: EntitlementRepository,
}

/// Build the application state and seed the course catalog
///
/// Each call produces an isolated store instance; tests get a fresh one
/// per spawned app.
pub async fn bootstrap(config: &ServerConfig) -> Result<AppState> {
    let catalog_repository = CatalogRepository::new();
    catalog_repository.seed(seed::course_seed()).await?;

    let entitlement_repository = EntitlementRepository::new(catalog_repository.clone());
    let user_repository = UserRepository::new();
    let session_repository = SessionRepository::new(config.session_ttl_seconds);

    Ok(AppState {
        user_repository,
        session_repository,
        catalog_repository,
        entitlement_repository,
    })
}
