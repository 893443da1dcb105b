use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{requests::product::SaveProductRequest, response::product::ProductResponse},
    middleware::json::JsonBody,
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    errors::{ErrorResponse, HttpError},
    tenant::TenantContext,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/{company}",
    tag = "Product",
    params(("company" = String, Path, description = "Tenant (company) name")),
    request_body = SaveProductRequest,
    responses(
        (status = 200, description = "Product saved for the company", body = ProductResponse),
        (status = 400, description = "Malformed body or empty company", body = ErrorResponse),
        (status = 409, description = "Product id belongs to another company", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    Path(company): Path<String>,
    JsonBody(body): JsonBody<SaveProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant = TenantContext::new(&company)?;
    let response = service.save_product(&tenant, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/{company}",
    tag = "Product",
    params(("company" = String, Path, description = "Tenant (company) name")),
    responses(
        (status = 200, description = "Products of the company", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Path(company): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant = TenantContext::new(&company)?;
    let response = service.find_all(&tenant).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/{company}/{id}",
    tag = "Product",
    params(
        ("company" = String, Path, description = "Tenant (company) name"),
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found for the company", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant = TenantContext::new(&company)?;
    let response = service.find_by_id(&tenant, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/{company}", get(get_products).post(create_product))
        .route("/{company}/{id}", get(get_product))
        .layer(Extension(app_state.di_container.product_command.clone()))
        .layer(Extension(app_state.di_container.product_query.clone()))
}
