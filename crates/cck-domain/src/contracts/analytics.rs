//! Analytics contract and domain types
//!
//! Analytics operations are synchronous fire-and-forget; implementations
//! that batch or ship events elsewhere do so off the caller's path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tracked event with free-form properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, Value>,
}

impl AnalyticsEvent {
    /// Event with no properties
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }
}

/// Free-form user traits attached to an identity
pub type UserProperties = HashMap<String, Value>;

/// Analytics service contract
pub trait AnalyticsService: Send + Sync {
    /// Track an event
    fn track(&self, event: AnalyticsEvent);

    /// Associate the session with a user id
    fn identify(&self, user_id: &str, properties: Option<UserProperties>);

    /// Reset user identity (on logout)
    fn reset(&self);

    /// Set user properties on the current identity
    fn set_user_properties(&self, properties: UserProperties);

    /// Track a screen view
    fn screen(&self, name: &str, properties: Option<HashMap<String, Value>>);
}
