#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use product::{
    abstract_trait::{
        code::{CodeGeneratorTrait, DynCodeGenerator},
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    },
    di::DependenciesInjectDeps,
    domain::requests::product::SaveProduct,
    handler::AppRouter,
    model::product::Product as ProductModel,
    service::code::format_code,
    state::AppState,
};
use shared::{errors::RepositoryError, tenant::TenantContext};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, ProductModel>,
    /// Last value handed out by the identity column, like the Postgres
    /// sequence behind `products.id`.
    identity: i32,
}

/// Rows keyed by id, mirroring the Postgres upsert and identity rules.
#[derive(Default)]
pub struct InMemoryProductStore {
    table: Mutex<Table>,
}

impl InMemoryProductStore {
    pub fn rows(&self) -> Vec<ProductModel> {
        self.table.lock().unwrap().rows.values().cloned().collect()
    }

    pub fn identity(&self) -> i32 {
        self.table.lock().unwrap().identity
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryProductStore {
    async fn save(
        &self,
        tenant: &TenantContext,
        req: &SaveProduct,
    ) -> Result<ProductModel, RepositoryError> {
        // let other requests interleave between code generation and the write
        tokio::task::yield_now().await;

        let now = Utc::now().naive_utc();
        let mut table = self.table.lock().unwrap();

        let id = match req.id {
            Some(id) => id,
            None => {
                table.identity += 1;
                table.identity
            }
        };

        if let Some(existing) = table.rows.get_mut(&id) {
            if existing.tenant != tenant.as_str() {
                return Err(RepositoryError::Conflict(format!(
                    "Product {id} belongs to another tenant"
                )));
            }

            existing.name = req.name.clone();
            existing.price = req.price;
            existing.code = req.code.clone();
            existing.updated_at = Some(now);
            return Ok(existing.clone());
        }

        let row = ProductModel {
            id,
            tenant: tenant.as_str().to_string(),
            name: req.name.clone(),
            price: req.price,
            code: req.code.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        table.rows.insert(id, row.clone());
        if req.id.is_some() {
            // explicit ids push the identity forward, as the repository does
            table.identity = table.identity.max(id);
        }
        Ok(row)
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryProductStore {
    async fn find_all(&self, tenant: &TenantContext) -> Result<Vec<ProductModel>, RepositoryError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .values()
            .filter(|row| row.tenant == tenant.as_str())
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        tenant: &TenantContext,
        id: i32,
    ) -> Result<Option<ProductModel>, RepositoryError> {
        Ok(self
            .table
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .filter(|row| row.tenant == tenant.as_str())
            .cloned())
    }
}

/// Per-tenant counter, same numbering as the Postgres sequence.
#[derive(Default)]
pub struct InMemorySequence {
    counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl CodeGeneratorTrait for InMemorySequence {
    async fn next_code(&self, tenant: &TenantContext) -> Result<String, RepositoryError> {
        let mut counters = self.counters.lock().unwrap();
        let next = counters.entry(tenant.as_str().to_string()).or_insert(0);
        let value = *next;
        *next += 1;
        Ok(format_code(tenant, value))
    }
}

pub struct FailingCodeGenerator;

#[async_trait]
impl CodeGeneratorTrait for FailingCodeGenerator {
    async fn next_code(&self, _tenant: &TenantContext) -> Result<String, RepositoryError> {
        Err(RepositoryError::Custom("sequence unavailable".into()))
    }
}

pub fn deps(store: Arc<InMemoryProductStore>, codes: DynCodeGenerator) -> DependenciesInjectDeps {
    DependenciesInjectDeps {
        command_repo: store.clone(),
        query_repo: store,
        code_generator: codes,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryProductStore>,
}

pub fn test_app(codes: DynCodeGenerator) -> TestApp {
    let store = Arc::new(InMemoryProductStore::default());
    let state = AppState::new(deps(store.clone(), codes));
    let server = TestServer::new(AppRouter::build(state)).expect("Failed to create test server");

    TestApp { server, store }
}

pub fn sequence_app() -> TestApp {
    test_app(Arc::new(InMemorySequence::default()))
}

pub fn tenant(name: &str) -> TenantContext {
    TenantContext::new(name).expect("valid tenant")
}
