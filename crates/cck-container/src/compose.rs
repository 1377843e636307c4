//! Container composition - the main entry point
//!
//! [`compose`] assembles a container from ordered layers:
//!
//! 1. Create an empty container.
//! 2. Bind caller-supplied external handles as constant values.
//! 3. Load the base module.
//! 4. Load the client- or preset-selected module (lazy, async).
//! 5. Load the overrides module, if any; overrides always win because
//!    they load after every other layer.
//! 6. Validate the fully-merged state unless skipped.
//!
//! A failed composition drops the partially built container; callers never
//! observe intermediate state. Each call builds a fresh container, so
//! concurrent compositions cannot interleave binding mutations.

use std::sync::Arc;

use cck_domain::contracts::{ApiClient, SsoAuthHandle};
use cck_domain::error::{Error, Result};
use tracing::{debug, info};

use crate::container::Container;
use crate::module::Module;
use crate::registry::Registries;
use crate::token::wellknown;
use crate::validate::{assert_valid, default_required, RequiredService};

/// What to do when the selected client id or preset name is unregistered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorPolicy {
    /// Log and continue without the client/preset layer
    #[default]
    Optional,
    /// Fail the composition with an `UnknownSelector` error naming the id
    Required,
}

/// Constant-valued bindings supplied by the caller
///
/// These cover handles the base module cannot construct itself: a
/// pre-configured HTTP client and, optionally, an external SSO SDK handle.
/// They are bound before any module loads so modules can probe them with
/// `is_bound`.
#[derive(Default)]
pub struct ExternalHandles {
    /// Bound under `Http.Client` when present
    pub http_client: Option<ApiClient>,
    /// Bound under `Auth.SsoHandle` when present
    pub sso_auth: Option<Arc<dyn SsoAuthHandle>>,
}

impl std::fmt::Debug for ExternalHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalHandles")
            .field("http_client", &self.http_client.is_some())
            .field("sso_auth", &self.sso_auth.is_some())
            .finish()
    }
}

/// Configuration for one composition call
#[derive(Debug)]
pub struct ComposeOptions {
    base: Module,
    client_id: Option<String>,
    preset: Option<String>,
    overrides: Option<Module>,
    skip_validation: bool,
    selector_policy: SelectorPolicy,
    required: Vec<RequiredService>,
    external: ExternalHandles,
}

impl ComposeOptions {
    /// Options applying only the given base module, validated against the
    /// default required-service list
    pub fn new(base: Module) -> Self {
        Self {
            base,
            client_id: None,
            preset: None,
            overrides: None,
            skip_validation: false,
            selector_policy: SelectorPolicy::default(),
            required: default_required(),
            external: ExternalHandles::default(),
        }
    }

    /// Select a client module layer (mutually exclusive with a preset)
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Select a preset module layer (mutually exclusive with a client id)
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Apply an override module after every other layer
    pub fn with_overrides(mut self, overrides: Module) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Skip the validation pass (for testing)
    pub fn skip_validation(mut self) -> Self {
        self.skip_validation = true;
        self
    }

    /// Treat an unregistered client id or preset name as fatal
    pub fn require_selector(mut self) -> Self {
        self.selector_policy = SelectorPolicy::Required;
        self
    }

    /// Replace the required-service list used by validation
    pub fn with_required(mut self, required: Vec<RequiredService>) -> Self {
        self.required = required;
        self
    }

    /// Supply a pre-configured HTTP client, bound under `Http.Client`
    pub fn with_http_client(mut self, client: ApiClient) -> Self {
        self.external.http_client = Some(client);
        self
    }

    /// Supply an external SSO SDK handle, bound under `Auth.SsoHandle`
    pub fn with_sso_auth(mut self, handle: Arc<dyn SsoAuthHandle>) -> Self {
        self.external.sso_auth = Some(handle);
        self
    }
}

/// Create and configure a container with all selected layers
///
/// See the module docs for the layer ordering contract. On an invalid
/// result the whole composition fails with an aggregated error listing
/// every missing token and every resolution error.
pub async fn compose(registries: &Registries, options: ComposeOptions) -> Result<Container> {
    if options.client_id.is_some() && options.preset.is_some() {
        return Err(Error::selection(
            "client_id and preset are mutually exclusive",
        ));
    }

    let mut container = Container::new();

    // External handles first so modules can probe them with is_bound.
    if let Some(api_client) = options.external.http_client {
        container.bind_constant(wellknown::http::client(), api_client)?;
        debug!("bound external HTTP client");
    }
    if let Some(sso) = options.external.sso_auth {
        container.bind_constant(wellknown::auth::sso_handle(), sso)?;
        debug!("bound external SSO auth handle");
    }

    container.load(&options.base)?;
    info!(base = options.base.name(), "loaded base module");

    let selector = options
        .client_id
        .as_deref()
        .map(|id| (&registries.clients, id))
        .or_else(|| options.preset.as_deref().map(|id| (&registries.presets, id)));

    if let Some((registry, id)) = selector {
        match registry.load(id).await? {
            Some(module) => {
                container.load(&module)?;
                info!(kind = registry.kind(), id, module = module.name(), "loaded selected module");
            }
            None => match options.selector_policy {
                SelectorPolicy::Required => {
                    return Err(Error::unknown_selector(registry.kind(), id));
                }
                SelectorPolicy::Optional => {
                    info!(kind = registry.kind(), id, "continuing without selected layer");
                }
            },
        }
    }

    if let Some(overrides) = &options.overrides {
        container.load(overrides)?;
        info!(module = overrides.name(), "loaded overrides module");
    }

    if !options.skip_validation {
        assert_valid(&container, &options.required)?;
        debug!(bindings = container.len(), "container validated");
    }

    Ok(container)
}
