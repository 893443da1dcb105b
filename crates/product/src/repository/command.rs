use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::SaveProduct, model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError, tenant::TenantContext};
use sqlx::{PgConnection, Postgres, Transaction};
use tracing::{error, info, warn};

/// Attempts at an identity-assigned insert before a primary key clash is
/// reported as a conflict.
const IDENTITY_INSERT_ATTEMPTS: usize = 3;

const PRIMARY_KEY: &str = "products_pkey";

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn insert(
        conn: &mut PgConnection,
        tenant: &TenantContext,
        product: &SaveProduct,
    ) -> Result<ProductModel, sqlx::Error> {
        sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (tenant, name, price, code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, current_timestamp, current_timestamp)
            RETURNING id, tenant, name, price, code, created_at, updated_at
            "#,
        )
        .bind(tenant.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.code)
        .fetch_one(conn)
        .await
    }

    /// Moves the identity past `id` so later inserts without an id never
    /// land on it. The identity only ever moves forward.
    async fn advance_identity(
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            SELECT setval(
                pg_get_serial_sequence('products', 'id')::regclass,
                GREATEST(
                    $1::BIGINT,
                    COALESCE(pg_sequence_last_value(pg_get_serial_sequence('products', 'id')::regclass), 0),
                    1
                )
            )
            "#,
        )
        .bind(i64::from(id))
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn save_with_identity(
        &self,
        tenant: &TenantContext,
        product: &SaveProduct,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut attempt = 1;
        loop {
            match Self::insert(&mut conn, tenant, product).await {
                Ok(result) => {
                    info!("✅ Created product ID {} ({})", result.id, result.code);
                    return Ok(result);
                }
                Err(sqlx::Error::Database(db_err))
                    if db_err.constraint() == Some(PRIMARY_KEY)
                        && attempt < IDENTITY_INSERT_ATTEMPTS =>
                {
                    warn!("⚠️ Identity value already taken for {tenant} (attempt {attempt}), retrying");
                    attempt += 1;
                }
                Err(err) => {
                    error!("❌ Failed to create product for {tenant}: {:?}", err);
                    return Err(RepositoryError::from(err));
                }
            }
        }
    }

    async fn save_with_id(
        &self,
        tenant: &TenantContext,
        id: i32,
        product: &SaveProduct,
    ) -> Result<ProductModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        // The WHERE clause turns a cross-tenant id into "no row returned".
        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (id, tenant, name, price, code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                price = EXCLUDED.price,
                code = EXCLUDED.code,
                updated_at = current_timestamp
            WHERE products.tenant = EXCLUDED.tenant
            RETURNING id, tenant, name, price, code, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(tenant.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.code)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to save product ID {id} for {tenant}: {:?}", err);
            RepositoryError::from(err)
        })?;

        let Some(product) = result else {
            warn!("⚠️ Product ID {id} is owned by another tenant, rejecting write from {tenant}");
            return Err(RepositoryError::Conflict(format!(
                "Product {id} belongs to another tenant"
            )));
        };

        Self::advance_identity(&mut tx, id).await.map_err(|err| {
            error!("❌ Failed to advance product identity past {id}: {:?}", err);
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit product ID {id} for {tenant}: {:?}", err);
            RepositoryError::from(err)
        })?;

        info!("✅ Saved product ID {} ({})", product.id, product.code);
        Ok(product)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn save(
        &self,
        tenant: &TenantContext,
        product: &SaveProduct,
    ) -> Result<ProductModel, RepositoryError> {
        match product.id {
            Some(id) => self.save_with_id(tenant, id, product).await,
            None => self.save_with_identity(tenant, product).await,
        }
    }
}
