//! Per-request tenant identification.
//!
//! A [`TenantContext`] is built from the request path and handed down the
//! call chain by reference. There is no process-wide "current tenant".

use crate::errors::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant identifier, e.g. a company name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The tenant a single operation acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    tenant_id: TenantId,
}

impl TenantContext {
    /// Keeps the name byte-for-byte. Empty names and names with leading or
    /// trailing whitespace are rejected, so `" acme"` never aliases `acme`.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ServiceError> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(ServiceError::Validation(vec![
                "tenant must not be empty".to_string(),
            ]));
        }
        if name.trim() != name {
            return Err(ServiceError::Validation(vec![format!(
                "tenant {name:?} must not start or end with whitespace"
            )]));
        }

        Ok(Self {
            tenant_id: TenantId(name.to_string()),
        })
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn as_str(&self) -> &str {
        self.tenant_id.as_str()
    }
}

impl fmt::Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tenant_id.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_name_as_given() {
        let tenant = TenantContext::new("acme").unwrap();
        assert_eq!(tenant.as_str(), "acme");
        assert_eq!(tenant.tenant_id().to_string(), "acme");
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        for name in ["  globex ", " globex", "globex\t", "\nglobex"] {
            assert!(
                matches!(TenantContext::new(name), Err(ServiceError::Validation(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let tenant = TenantContext::new("acme corp").unwrap();
        assert_eq!(tenant.as_str(), "acme corp");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(
            TenantContext::new("   "),
            Err(ServiceError::Validation(_))
        ));
        assert!(TenantContext::new("").is_err());
    }

    #[test]
    fn contexts_are_independent_values() {
        let a = TenantContext::new("acme").unwrap();
        let b = TenantContext::new("globex").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }
}
