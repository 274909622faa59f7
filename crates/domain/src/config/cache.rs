use serde::{Deserialize, Serialize};

/// TTL for answers that carry none, and for sinkhole answers.
pub const DEFAULT_ANSWER_TTL: u32 = 50;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Longest CNAME chain followed before a lookup is treated as a miss.
    #[serde(default = "default_max_cname_depth")]
    pub max_cname_depth: usize,

    /// TTL given to answers whose record set carries none.
    #[serde(default = "default_answer_ttl")]
    pub default_answer_ttl: u32,

    #[serde(default = "default_sinkhole_ttl")]
    pub sinkhole_ttl: u32,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_cname_depth: default_max_cname_depth(),
            default_answer_ttl: default_answer_ttl(),
            sinkhole_ttl: default_sinkhole_ttl(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_max_cname_depth() -> usize {
    8
}

fn default_answer_ttl() -> u32 {
    DEFAULT_ANSWER_TTL
}

fn default_sinkhole_ttl() -> u32 {
    DEFAULT_ANSWER_TTL
}

fn default_sweep_interval_secs() -> u64 {
    60
}
