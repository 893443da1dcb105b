use crate::{
    abstract_trait::{
        code::DynCodeGenerator,
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::{DynProductCommandService, DynProductQueryService},
        },
    },
    repository::{
        command::ProductCommandRepository, query::ProductQueryRepository,
        sequence::SequenceCodeGenerator,
    },
    service::{
        code::{CodeStrategy, RandomCodeGenerator, UuidCodeGenerator},
        command::ProductCommandService,
        query::ProductQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_command: DynProductCommandService,
    pub product_query: DynProductQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_command", &"DynProductCommandService")
            .field("product_query", &"DynProductQueryService")
            .finish()
    }
}

/// Storage-facing dependencies. Production wiring comes from
/// [`DependenciesInjectDeps::postgres`]; anything implementing the traits
/// can be plugged in instead.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub command_repo: DynProductCommandRepository,
    pub query_repo: DynProductQueryRepository,
    pub code_generator: DynCodeGenerator,
}

impl DependenciesInjectDeps {
    pub fn postgres(pool: ConnectionPool, code_strategy: CodeStrategy) -> Self {
        let code_generator: DynCodeGenerator = match code_strategy {
            CodeStrategy::Sequence => Arc::new(SequenceCodeGenerator::new(pool.clone())),
            CodeStrategy::Random => Arc::new(RandomCodeGenerator),
            CodeStrategy::Uuid => Arc::new(UuidCodeGenerator),
        };

        Self {
            command_repo: Arc::new(ProductCommandRepository::new(pool.clone())),
            query_repo: Arc::new(ProductQueryRepository::new(pool)),
            code_generator,
        }
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            command_repo,
            query_repo,
            code_generator,
        } = deps;

        let product_command: DynProductCommandService = Arc::new(ProductCommandService::new(
            command_repo,
            code_generator,
            registry,
        ));

        let product_query: DynProductQueryService =
            Arc::new(ProductQueryService::new(query_repo, registry));

        Self {
            product_command,
            product_query,
        }
    }
}
