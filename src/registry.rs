use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::component::SentryComponent;

/// Named Sentry components an application makes available to its routes.
#[derive(Default)]
pub struct ComponentRegistry {
    components: RwLock<HashMap<String, Arc<SentryComponent>>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` under `id`, returning the one it replaced.
    pub fn set_component(
        &self,
        id: impl Into<String>,
        component: Arc<SentryComponent>,
    ) -> Option<Arc<SentryComponent>> {
        self.components.write().insert(id.into(), component)
    }

    /// `true` when something is registered under `id`.
    pub fn has_component(&self, id: &str) -> bool {
        self.components.read().contains_key(id)
    }

    /// The component registered under `id`.
    pub fn component(&self, id: &str) -> Option<Arc<SentryComponent>> {
        self.components.read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentry_core::ClientOptions;

    #[test]
    fn lookup_by_id() {
        let registry = ComponentRegistry::new();
        assert!(!registry.has_component("sentry"));
        assert!(registry.component("sentry").is_none());

        let component = Arc::new(SentryComponent::with_options(ClientOptions::default()));
        assert!(registry.set_component("sentry", component.clone()).is_none());

        assert!(registry.has_component("sentry"));
        assert!(Arc::ptr_eq(&registry.component("sentry").unwrap(), &component));
        assert!(!registry.has_component("other"));
    }
}
