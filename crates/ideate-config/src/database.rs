//! Record store location.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".ideate/ideate.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the libSQL database file. `:memory:` opens a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_project_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".ideate/ideate.db");
        assert!(!config.is_in_memory());
    }
}
