use std::env;
use tracing::warn;

pub const DEFAULT_REMINDER_OFFSET_HOURS: i64 = 2;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    /// When set, a missing or invalid bearer token degrades to a demo
    /// patient identity instead of a 401. Never enable in production.
    pub demo_mode: bool,
    /// Directory for the file-backed collection store. Empty = memory only.
    pub data_dir: String,
    pub reminder_offset_hours: i64,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("MEDIRDV_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("MEDIRDV_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            demo_mode: env::var("MEDIRDV_DEMO_MODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            data_dir: env::var("MEDIRDV_DATA_DIR").unwrap_or_default(),
            reminder_offset_hours: env::var("MEDIRDV_REMINDER_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REMINDER_OFFSET_HOURS),
            bind_addr: env::var("MEDIRDV_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }
        if config.demo_mode {
            warn!("Demo mode enabled: authentication failures fall back to a demo identity");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty() || self.demo_mode
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            demo_mode: false,
            data_dir: String::new(),
            reminder_offset_hours: DEFAULT_REMINDER_OFFSET_HOURS,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}
