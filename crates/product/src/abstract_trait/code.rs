use async_trait::async_trait;
use shared::{errors::RepositoryError, tenant::TenantContext};
use std::sync::Arc;

pub type DynCodeGenerator = Arc<dyn CodeGeneratorTrait + Send + Sync>;

/// Produces the `code` stamped onto a product when it is saved.
#[async_trait]
pub trait CodeGeneratorTrait {
    async fn next_code(&self, tenant: &TenantContext) -> Result<String, RepositoryError>;
}
