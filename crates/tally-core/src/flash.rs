//! Display-once status messages.
//!
//! A session holds at most one error and one success message. Renderers take
//! both with [`SessionState::take_flash`](crate::SessionState::take_flash),
//! which clears the slots so a message never shows up on a later page.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}
