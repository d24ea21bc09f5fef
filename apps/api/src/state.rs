use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{RoleDirectory, SessionRevocations, TokenVerifier};
use crate::cache::ListCache;
use crate::llm_client::ChatModel;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: ListCache,
    pub storage: ObjectStore,
    /// The AI gateway. Handlers only see the trait.
    pub llm: Arc<dyn ChatModel>,
    pub auth: Arc<TokenVerifier>,
    /// Role lookup for each authenticated request.
    pub roles: Arc<dyn RoleDirectory>,
    pub revocations: SessionRevocations,
}
