use serde::{Deserialize, Serialize};

/// Knobs for the internal retry loop of [`Forger::sign`](crate::Forger::sign).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Attempts before giving up with `ExhaustedRetries`. `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        ForgeConfig {
            max_attempts: Some(64),
        }
    }
}

impl ForgeConfig {
    pub fn unbounded() -> Self {
        ForgeConfig { max_attempts: None }
    }

    pub fn with_max_attempts(max_attempts: u32) -> Self {
        ForgeConfig {
            max_attempts: Some(max_attempts),
        }
    }

    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(false, |max| attempts >= max)
    }
}
