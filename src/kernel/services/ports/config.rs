use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Trailing-edge delay before the deferred view of the active file settles.
    pub analysis_delay_ms: u64,
    pub max_line_length: usize,
    /// Page address used when none is given on the command line.
    pub page_url: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 150,
            max_line_length: 88,
            page_url: "http://localhost:3000/".to_string(),
        }
    }
}

impl ShellConfig {
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }
}
