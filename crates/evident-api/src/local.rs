//! In-process [`MetadataSource`] over the service's own resolvers and
//! scope, so a [`CachedMetadataClient`](evident_client::CachedMetadataClient)
//! can front an embedded resolver without HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use evident_client::{ClientError, MetadataSource};
use evident_core::wire::BatchItemResult;
use evident_core::PolicyReference;
use evident_mapper::{ResolverSet, ScopeHandle};

use crate::batch::resolve_items;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct LocalMetadataSource {
    resolvers: Arc<ResolverSet>,
    scope: Arc<ScopeHandle>,
}

impl LocalMetadataSource {
    pub fn new(resolvers: Arc<ResolverSet>, scope: Arc<ScopeHandle>) -> Self {
        Self { resolvers, scope }
    }
}

impl From<&AppState> for LocalMetadataSource {
    fn from(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.resolvers), Arc::clone(&state.scope))
    }
}

#[async_trait]
impl MetadataSource for LocalMetadataSource {
    async fn fetch_metadata_batch(
        &self,
        policies: &[PolicyReference],
    ) -> Result<Vec<BatchItemResult>, ClientError> {
        let scope = self.scope.snapshot();
        Ok(resolve_items(&self.resolvers, &scope, policies))
    }
}
