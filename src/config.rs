use crate::persistence::DatabaseConfig;

/// Application configuration, assembled from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,

    /// Provision the demo units and starter catalog when the store is empty.
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let seed_demo_data = std::env::var("DEPOT_SEED_DEMO_DATA")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(false);

        Self {
            database: DatabaseConfig::from_env(),
            seed_demo_data,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            seed_demo_data: false,
        }
    }
}
