use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::access::Role;

/// Looks up the role assigned to a principal.
///
/// Carried in `AppState` as `Arc<dyn RoleDirectory>`.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn role_of(&self, principal: Uuid) -> anyhow::Result<Option<Role>>;
}

/// Reads roles from the `user_roles` table (one row per principal).
pub struct PgRoleDirectory {
    pool: PgPool,
}

impl PgRoleDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleDirectory for PgRoleDirectory {
    async fn role_of(&self, principal: Uuid) -> anyhow::Result<Option<Role>> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT role FROM user_roles WHERE user_id = $1")
                .bind(principal)
                .fetch_optional(&self.pool)
                .await?;

        Ok(stored.and_then(|value| {
            let role = Role::parse(&value);
            if role.is_none() {
                warn!("principal {principal} has unrecognized role '{value}'");
            }
            role
        }))
    }
}
