use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::load_json_or_default;

pub const CONFIG_FILE: &str = "config.json";

/// Connection to the hosted table plus the session handed over by the auth flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

impl BackendConfig {
    pub fn table(&self) -> &str {
        if self.table.is_empty() {
            "applications"
        } else {
            &self.table
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub save_debounce_ms: u64,
    pub toast_ms: u64,
    pub saved_indicator_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self { save_debounce_ms: 1500, toast_ms: 3000, saved_indicator_ms: 2000 }
    }
}

impl Timings {
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn saved_indicator(&self) -> Duration {
        Duration::from_millis(self.saved_indicator_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub timings: Timings,
    pub persist_columns: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            timings: Timings::default(),
            persist_columns: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = load_json_or_default::<AppConfig>(CONFIG_FILE);
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup("JOBTRACK_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(key) = lookup("JOBTRACK_ANON_KEY") {
            self.backend.anon_key = key;
        }
        if let Some(token) = lookup("JOBTRACK_ACCESS_TOKEN") {
            self.backend.access_token = Some(token);
        }
        if let Some(user_id) = lookup("JOBTRACK_USER_ID") {
            self.backend.user_id = Some(user_id);
        }
        if let Some(level) = lookup("JOBTRACK_LOG") {
            self.log_level = level;
        }
    }
}
