//! CSV export configuration.

use serde::{Deserialize, Serialize};

/// Where file exports are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving `logs_export_*.csv` files.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "exports".to_string()
}
