use crate::theme::ThemeName;
use serde::{Deserialize, Serialize};

pub mod store;

pub const SCHEMA_VERSION: u32 = 1;

/// Client state that survives restarts: the session token and the chosen
/// theme. Everything else (transcript, sidebar history) is per-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub schema_version: u32,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub theme: ThemeName,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            token: None,
            theme: ThemeName::default(),
        }
    }
}

impl Profile {
    /// Token presence is the authentication state.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
