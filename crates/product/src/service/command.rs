use crate::{
    abstract_trait::{
        code::DynCodeGenerator,
        product::{
            repository::DynProductCommandRepository, service::ProductCommandServiceTrait,
        },
    },
    domain::{
        requests::product::{SaveProduct, SaveProductRequest},
        response::product::ProductResponse,
    },
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
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub codes: DynCodeGenerator,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(
        command: DynProductCommandRepository,
        codes: DynCodeGenerator,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_command_service", registry);

        Self {
            command,
            codes,
            metrics,
        }
    }

    fn complete_tracing(&self, tracing_ctx: &TracingContext, is_success: bool, message: &str) {
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.finish(is_success, message);
        self.metrics.record(Method::Post, status, elapsed);
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn save_product(
        &self,
        tenant: &TenantContext,
        req: &SaveProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("💾 Saving product for tenant {tenant} | id: {:?}", req.id);

        let tracing_ctx = TracingContext::start(
            "product-command-service",
            "product_save",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "save"),
                KeyValue::new("tenant", tenant.to_string()),
                KeyValue::new(
                    "product.id",
                    req.id.map(|id| id.to_string()).unwrap_or_default(),
                ),
            ],
        );

        let code = match self.codes.next_code(tenant).await {
            Ok(code) => code,
            Err(e) => {
                let msg = format!("❌ Failed to generate product code for {tenant}: {e:?}");
                error!("{msg}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        let product = SaveProduct::from_request(req, code);

        let saved = match self.command.save(tenant, &product).await {
            Ok(saved) => saved,
            Err(e) => {
                let msg = format!("❌ Failed to save product for {tenant}: {e:?}");
                error!("{msg}");
                self.complete_tracing(&tracing_ctx, false, &msg);
                return Err(ServiceError::Repo(e));
            }
        };

        self.complete_tracing(&tracing_ctx, true, "Product saved");

        info!(
            "✅ Product saved for tenant {tenant}: ID {} ({})",
            saved.id, saved.code
        );

        Ok(ProductResponse::from(saved))
    }
}
