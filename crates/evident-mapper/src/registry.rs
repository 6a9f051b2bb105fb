//! # Resolver Registry
//!
//! Selects a [`MetadataResolver`] by policy engine name. Engines without a
//! dedicated implementation get the fallback, so selection never fails.

use std::collections::HashMap;
use std::sync::Arc;

use evident_core::EngineName;

use crate::basic::BasicResolver;
use crate::error::RegistryError;
use crate::resolver::MetadataResolver;

#[derive(Debug, Clone)]
pub struct ResolverSet {
    resolvers: HashMap<EngineName, Arc<dyn MetadataResolver>>,
    fallback: Arc<dyn MetadataResolver>,
}

impl ResolverSet {
    pub fn new(fallback: Arc<dyn MetadataResolver>) -> Self {
        Self {
            resolvers: HashMap::new(),
            fallback,
        }
    }

    /// Register `resolver` for `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEngine`] if `engine` already has a
    /// resolver. The existing registration is kept.
    pub fn register(
        &mut self,
        engine: EngineName,
        resolver: Arc<dyn MetadataResolver>,
    ) -> Result<(), RegistryError> {
        if self.resolvers.contains_key(&engine) {
            return Err(RegistryError::DuplicateEngine { engine });
        }
        tracing::debug!(engine = %engine, resolver = resolver.id(), "registered resolver");
        self.resolvers.insert(engine, resolver);
        Ok(())
    }

    /// The resolver for `engine`, or the fallback.
    pub fn select(&self, engine: &EngineName) -> &Arc<dyn MetadataResolver> {
        match self.resolvers.get(engine) {
            Some(resolver) => resolver,
            None => {
                tracing::trace!(engine = %engine, fallback = self.fallback.id(), "no dedicated resolver");
                &self.fallback
            }
        }
    }

    pub fn fallback(&self) -> &Arc<dyn MetadataResolver> {
        &self.fallback
    }

    pub fn engines(&self) -> impl Iterator<Item = &EngineName> {
        self.resolvers.keys()
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for ResolverSet {
    fn default() -> Self {
        Self::new(Arc::new(BasicResolver::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evident_core::{AssessmentPlan, CatalogId, EnrichmentOutcome, RuleId};

    use crate::scope::Scope;

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl MetadataResolver for Fixed {
        fn id(&self) -> &str {
            self.0
        }

        fn metadata(&self, rule_id: &RuleId, _scope: &Scope) -> EnrichmentOutcome {
            let mut outcome = EnrichmentOutcome::unmapped(rule_id);
            outcome.metadata.category = self.0.to_string();
            outcome
        }

        fn register_plan(&self, _catalog_id: CatalogId, _plans: Vec<AssessmentPlan>) -> u64 {
            0
        }
    }

    fn engine(name: &str) -> EngineName {
        EngineName::new(name).unwrap()
    }

    #[test]
    fn select_returns_registered_resolver() {
        let mut set = ResolverSet::default();
        set.register(engine("opa"), Arc::new(Fixed("opa-resolver"))).unwrap();

        assert_eq!(set.select(&engine("opa")).id(), "opa-resolver");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unknown_engine_falls_back() {
        let set = ResolverSet::default();
        assert_eq!(set.select(&engine("kyverno")).id(), "basic");
        assert!(set.is_empty());
    }

    #[test]
    fn duplicate_engine_is_rejected() {
        let mut set = ResolverSet::default();
        set.register(engine("opa"), Arc::new(Fixed("first"))).unwrap();
        let err = set
            .register(engine("opa"), Arc::new(Fixed("second")))
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateEngine { engine: engine("opa") });
        assert_eq!(set.select(&engine("opa")).id(), "first");
    }
}
