//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Default tracing filter directive, used when `TALLY_LOG` is unset
    /// (e.g. `"tally_web=debug,info"`). Empty means "pick from CLI flags".
    #[serde(default)]
    pub log_filter: String,
}
