use crate::{domain::requests::product::SaveProduct, model::product::Product as ProductModel};
use async_trait::async_trait;
use shared::{errors::RepositoryError, tenant::TenantContext};
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    /// Inserts the product, or updates it when `id` already belongs to
    /// `tenant`. An `id` owned by another tenant is a
    /// [`RepositoryError::Conflict`].
    async fn save(
        &self,
        tenant: &TenantContext,
        req: &SaveProduct,
    ) -> Result<ProductModel, RepositoryError>;
}
