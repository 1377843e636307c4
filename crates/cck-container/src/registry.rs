//! Client/Preset Module Registry
//!
//! Maps external string identifiers (client ids, preset names) to deferred
//! module loaders. Loaders are lazy: only the selected client's module is
//! ever materialized, so unselected configurations are never evaluated or
//! paid for.
//!
//! Built-in modules register at compile time through `linkme` distributed
//! slices; [`Registries::builtin`] seeds a runtime registry from them,
//! and `register` remains available for host applications adding clients
//! at startup (last write wins, no duplicate-detection error).
//!
//! ## Registration
//!
//! ```ignore
//! #[linkme::distributed_slice(CLIENT_MODULES)]
//! static ACME_CLIENT: RegisteredModule = RegisteredModule {
//!     id: "acme",
//!     description: "Acme Corp service bindings",
//!     loader: || Box::pin(async { Ok(acme_client_module()) }),
//! };
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use cck_domain::error::Result;
use futures::future::BoxFuture;
use tracing::{debug, warn};

use crate::module::Module;

/// Deferred, asynchronous module factory
pub type ModuleLoader = Arc<dyn Fn() -> BoxFuture<'static, Result<Module>> + Send + Sync>;

/// Compile-time registry entry for a built-in client or preset module
pub struct RegisteredModule {
    /// External identifier ("example-client", "mock")
    pub id: &'static str,
    /// Human-readable description for CLI listings
    pub description: &'static str,
    /// Deferred loader producing the module
    pub loader: fn() -> BoxFuture<'static, Result<Module>>,
}

// Auto-collection via linkme distributed slices - built-in modules submit
// entries at compile time.
#[linkme::distributed_slice]
pub static CLIENT_MODULES: [RegisteredModule] = [..];

#[linkme::distributed_slice]
pub static PRESET_MODULES: [RegisteredModule] = [..];

/// Runtime registry of deferred module loaders for one selector kind
pub struct ModuleRegistry {
    kind: &'static str,
    loaders: RwLock<HashMap<String, ModuleLoader>>,
}

impl ModuleRegistry {
    /// Create an empty registry for the given selector kind
    /// ("client" or "preset", used in diagnostics)
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            loaders: RwLock::new(HashMap::new()),
        }
    }

    /// The selector kind this registry serves
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register a deferred loader for `id`
    ///
    /// Re-registering the same id overwrites the previous loader (last
    /// write wins). Registration is expected to happen at startup, before
    /// any composition call.
    pub fn register<F, Fut>(&self, id: impl Into<String>, loader: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Module>> + Send + 'static,
    {
        let id = id.into();
        let erased: ModuleLoader =
            Arc::new(move || -> BoxFuture<'static, Result<Module>> { Box::pin(loader()) });
        let previous = self
            .loaders
            .write()
            .expect("module registry lock poisoned")
            .insert(id.clone(), erased);
        if previous.is_some() {
            debug!(kind = self.kind, id, "module loader replaced");
        }
    }

    /// Invoke the loader for `id`, producing its module
    ///
    /// The loader runs once per call: modules are reconstructed, never
    /// cached across compositions. Returns `Ok(None)` with a diagnostic
    /// when no loader is registered; whether that is fatal is the
    /// composition policy's decision.
    pub async fn load(&self, id: &str) -> Result<Option<Module>> {
        let loader = {
            let loaders = self.loaders.read().expect("module registry lock poisoned");
            loaders.get(id).cloned()
        };

        match loader {
            Some(loader) => {
                debug!(kind = self.kind, id, "loading module");
                (loader.as_ref())().await.map(Some)
            }
            None => {
                warn!(kind = self.kind, id, "no module registered");
                Ok(None)
            }
        }
    }

    /// Whether a loader is registered for `id`
    pub fn has(&self, id: &str) -> bool {
        self.loaders
            .read()
            .expect("module registry lock poisoned")
            .contains_key(id)
    }

    /// All registered ids, sorted for stable output
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .loaders
            .read()
            .expect("module registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("kind", &self.kind)
            .field("ids", &self.list())
            .finish()
    }
}

/// The registries consulted by composition, one per selector kind
///
/// Constructed explicitly and passed by reference to [`crate::compose`] so
/// tests can build isolated instances instead of sharing process globals.
#[derive(Debug)]
pub struct Registries {
    pub clients: ModuleRegistry,
    pub presets: ModuleRegistry,
}

impl Registries {
    /// Registries with no loaders
    pub fn empty() -> Self {
        Self {
            clients: ModuleRegistry::new("client"),
            presets: ModuleRegistry::new("preset"),
        }
    }

    /// Registries seeded with every compile-time registered module
    pub fn builtin() -> Self {
        let registries = Self::empty();
        for entry in CLIENT_MODULES {
            registries.clients.register(entry.id, entry.loader);
        }
        for entry in PRESET_MODULES {
            registries.presets.register(entry.id, entry.loader);
        }
        registries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn empty_module(name: &'static str) -> Module {
        Module::new(name, |_| Ok(()))
    }

    #[tokio::test]
    async fn load_invokes_loader_per_call() {
        let registry = ModuleRegistry::new("client");
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        registry.register("acme", move || {
            counted.fetch_add(1, Ordering::SeqCst);
            async { Ok(empty_module("acme")) }
        });

        assert!(registry.load("acme").await.unwrap().is_some());
        assert!(registry.load("acme").await.unwrap().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn load_unknown_id_returns_none() {
        let registry = ModuleRegistry::new("client");
        assert!(registry.load("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reregistering_overwrites_last_write_wins() {
        let registry = ModuleRegistry::new("preset");
        registry.register("mock", || async { Ok(empty_module("first")) });
        registry.register("mock", || async { Ok(empty_module("second")) });

        let module = registry.load("mock").await.unwrap().unwrap();
        assert_eq!(module.name(), "second");
    }

    #[test]
    fn has_and_list_are_pure_queries() {
        let registry = ModuleRegistry::new("client");
        registry.register("beta", || async { Ok(empty_module("beta")) });
        registry.register("alpha", || async { Ok(empty_module("alpha")) });

        assert!(registry.has("alpha"));
        assert!(!registry.has("gamma"));
        assert_eq!(registry.list(), vec!["alpha".to_string(), "beta".to_string()]);
    }
}
