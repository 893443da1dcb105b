use crate::domain::{requests::product::SaveProductRequest, response::product::ProductResponse};
use async_trait::async_trait;
use shared::{errors::ServiceError, tenant::TenantContext};
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn save_product(
        &self,
        tenant: &TenantContext,
        req: &SaveProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
}
