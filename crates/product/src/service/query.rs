use crate::{
    abstract_trait::product::{
        repository::DynProductQueryRepository, service::ProductQueryServiceTrait,
    },
    domain::response::product::ProductResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    tenant::TenantContext,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_query_service", registry);

        Self { query, metrics }
    }

    fn complete_tracing(&self, tracing_ctx: &TracingContext, is_success: bool, message: &str) {
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.finish(is_success, message);
        self.metrics.record(Method::Get, status, elapsed);
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, tenant: &TenantContext) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products for tenant {tenant}");

        let tracing_ctx = TracingContext::start(
            "product-query-service",
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("tenant", tenant.to_string()),
            ],
        );

        let products = match self.query.find_all(tenant).await {
            Ok(products) => products,
            Err(e) => {
                let msg = format!("❌ Failed to fetch products for {tenant}: {e:?}");
                error!("{msg}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        self.complete_tracing(&tracing_ctx, true, "Products retrieved from DB");

        info!("✅ Found {} products for tenant {tenant}", products.len());

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    async fn find_by_id(
        &self,
        tenant: &TenantContext,
        id: i32,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id} for tenant {tenant}");

        let tracing_ctx = TracingContext::start(
            "product-query-service",
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("tenant", tenant.to_string()),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(tenant, id).await {
            Ok(Some(product)) => {
                self.complete_tracing(&tracing_ctx, true, "Product retrieved from DB");
                Ok(ProductResponse::from(product))
            }
            Ok(None) => {
                let msg = format!("Product {id} not found");
                self.complete_tracing(&tracing_ctx, false, &msg);
                Err(ServiceError::NotFound(msg))
            }
            Err(e) => {
                let msg = format!("❌ Database error while finding product ID {id}: {e:?}");
                error!("{msg}");
                self.complete_tracing(&tracing_ctx, false, "Database error");
                Err(ServiceError::Repo(e))
            }
        }
    }
}
