//! Tracing-backed analytics service
//!
//! Routes analytics calls into the tracing pipeline instead of an external
//! vendor. Useful as the default binding in development; client modules
//! replace it with a vendor-backed implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use cck_domain::contracts::{AnalyticsEvent, AnalyticsService, UserProperties};

/// Analytics service that logs events through `tracing`
#[derive(Debug, Default)]
pub struct TracingAnalyticsService {
    identity: RwLock<Option<String>>,
}

impl TracingAnalyticsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identified user, if any
    pub fn identity(&self) -> Option<String> {
        self.identity
            .read()
            .expect("analytics state lock poisoned")
            .clone()
    }
}

impl AnalyticsService for TracingAnalyticsService {
    fn track(&self, event: AnalyticsEvent) {
        debug!(target: "analytics", event = %event.name, properties = event.properties.len(), "track");
    }

    fn identify(&self, user_id: &str, properties: Option<UserProperties>) {
        debug!(target: "analytics", user_id, traits = properties.map_or(0, |p| p.len()), "identify");
        *self
            .identity
            .write()
            .expect("analytics state lock poisoned") = Some(user_id.to_string());
    }

    fn reset(&self) {
        debug!(target: "analytics", "reset identity");
        *self
            .identity
            .write()
            .expect("analytics state lock poisoned") = None;
    }

    fn set_user_properties(&self, properties: UserProperties) {
        debug!(target: "analytics", traits = properties.len(), "set user properties");
    }

    fn screen(&self, name: &str, properties: Option<HashMap<String, Value>>) {
        debug!(target: "analytics", screen = name, properties = properties.map_or(0, |p| p.len()), "screen view");
    }
}
