use crate::domain::response::product::ProductResponse;
use async_trait::async_trait;
use shared::{errors::ServiceError, tenant::TenantContext};
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(&self, tenant: &TenantContext) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn find_by_id(
        &self,
        tenant: &TenantContext,
        id: i32,
    ) -> Result<ProductResponse, ServiceError>;
}
