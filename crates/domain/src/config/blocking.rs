use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockingConfig {
    /// 0 loads the blocklist once at startup.
    #[serde(default)]
    pub reload_interval_secs: u64,
}
