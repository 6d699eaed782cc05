use chrono_tz::Tz;
use derive_getters::Getters;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Getters)]
pub struct Config {
    /// Timezone server timestamps are converted into for display
    local_timezone: Tz,
}

impl Config {
    pub fn new(local_timezone: Tz) -> Self {
        Self { local_timezone }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}
