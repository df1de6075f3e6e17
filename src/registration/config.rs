#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Message published right after a person is registered and authenticated.
pub const DEFAULT_MESSAGE: &str = "Hello les cocos";

/// Settings for [`PersonService`](super::PersonService) and
/// [`AsyncPersonService`](super::AsyncPersonService).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RegistrationConfig {
    pub message: String,
}

impl RegistrationConfig {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { message: DEFAULT_MESSAGE.to_owned() }
    }
}
