use crate::abstract_trait::code::CodeGeneratorTrait;
use async_trait::async_trait;
use rand::Rng;
use shared::{errors::RepositoryError, tenant::TenantContext};
use std::{fmt, str::FromStr};

/// Exclusive upper bound of the suffix drawn by [`RandomCodeGenerator`].
pub const RANDOM_SUFFIX_BOUND: u32 = 100;

pub fn format_code(tenant: &TenantContext, suffix: impl fmt::Display) -> String {
    format!("{}_{suffix}", tenant.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeStrategy {
    #[default]
    Sequence,
    Random,
    Uuid,
}

impl FromStr for CodeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequence" => Ok(CodeStrategy::Sequence),
            "random" => Ok(CodeStrategy::Random),
            "uuid" => Ok(CodeStrategy::Uuid),
            other => Err(format!(
                "unknown code strategy '{other}', expected sequence, random or uuid"
            )),
        }
    }
}

impl fmt::Display for CodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeStrategy::Sequence => "sequence",
            CodeStrategy::Random => "random",
            CodeStrategy::Uuid => "uuid",
        };
        f.write_str(name)
    }
}

/// `{tenant}_{0..100}`. Collides often; kept for compatibility.
#[derive(Debug, Clone, Default)]
pub struct RandomCodeGenerator;

#[async_trait]
impl CodeGeneratorTrait for RandomCodeGenerator {
    async fn next_code(&self, tenant: &TenantContext) -> Result<String, RepositoryError> {
        let suffix = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
        Ok(format_code(tenant, suffix))
    }
}

/// `{tenant}_{uuid-v4 without hyphens}`.
#[derive(Debug, Clone, Default)]
pub struct UuidCodeGenerator;

#[async_trait]
impl CodeGeneratorTrait for UuidCodeGenerator {
    async fn next_code(&self, tenant: &TenantContext) -> Result<String, RepositoryError> {
        Ok(format_code(tenant, uuid::Uuid::new_v4().simple()))
    }
}
