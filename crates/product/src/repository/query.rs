use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError, tenant::TenantContext};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self, tenant: &TenantContext) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products for tenant {tenant}");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, tenant, name, price, code, created_at, updated_at
            FROM products
            WHERE tenant = $1
            ORDER BY id
            "#,
        )
        .bind(tenant.as_str())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products for {tenant}: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_by_id(
        &self,
        tenant: &TenantContext,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {id} for tenant {tenant}");

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, tenant, name, price, code, created_at, updated_at
            FROM products
            WHERE id = $1 AND tenant = $2
            "#,
        )
        .bind(id)
        .bind(tenant.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(result)
    }
}
