use crate::{abstract_trait::code::CodeGeneratorTrait, service::code::format_code};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError, tenant::TenantContext};
use tracing::{debug, error};

/// Per-tenant counter kept in `tenant_code_sequences`. The upsert is a single
/// statement, so concurrent callers never receive the same value.
///
/// The counter advances in its own statement, ahead of the product write. A
/// save that then fails (conflict or database error) leaves a gap in the
/// tenant's numbering; codes stay unique but are not guaranteed contiguous.
#[derive(Clone)]
pub struct SequenceCodeGenerator {
    db: ConnectionPool,
}

impl SequenceCodeGenerator {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CodeGeneratorTrait for SequenceCodeGenerator {
    async fn next_code(&self, tenant: &TenantContext) -> Result<String, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let value = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tenant_code_sequences (tenant, next_value)
            VALUES ($1, 1)
            ON CONFLICT (tenant) DO UPDATE
            SET next_value = tenant_code_sequences.next_value + 1
            RETURNING next_value - 1
            "#,
        )
        .bind(tenant.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to advance code sequence for {tenant}: {:?}", e);
            RepositoryError::from(e)
        })?;

        debug!("Next code value for {tenant}: {value}");
        Ok(format_code(tenant, value))
    }
}
