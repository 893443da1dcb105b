use crate::model::product::Product as ProductModel;
use async_trait::async_trait;
use shared::{errors::RepositoryError, tenant::TenantContext};
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self, tenant: &TenantContext) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_id(
        &self,
        tenant: &TenantContext,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError>;
}
