//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use inbrief_infra::{CloudinaryConfig, DatabaseConfig};

/// Folder on the media host that receives admin uploads.
pub const DEFAULT_UPLOAD_FOLDER: &str = "inbrief-news";

const DEFAULT_CLOUDINARY_API: &str = "https://api.cloudinary.com";

/// Application configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server over the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// `None` disables image uploads.
    pub cloudinary: Option<CloudinaryConfig>,
    pub upload_folder: String,
    /// Emit JSON log lines instead of pretty output.
    pub json_logs: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str, default: u64| -> u64 { parsed(&lookup, key).unwrap_or(default) };

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .map(|url| {
                let mut db = DatabaseConfig::new(url);
                db.max_connections = parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(db.max_connections);
                db.min_connections = parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(db.min_connections);
                db.acquire_timeout = Duration::from_secs(parse(
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    db.acquire_timeout.as_secs(),
                ));
                db.max_lifetime =
                    Duration::from_secs(parse("DB_MAX_LIFETIME_SECS", db.max_lifetime.as_secs()));
                db
            });

        let cloudinary = match (
            lookup("CLOUDINARY_CLOUD_NAME"),
            lookup("CLOUDINARY_API_KEY"),
            lookup("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret))
                if !cloud_name.is_empty() && !api_key.is_empty() && !api_secret.is_empty() =>
            {
                Some(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    api_base: lookup("CLOUDINARY_API_BASE")
                        .unwrap_or_else(|| DEFAULT_CLOUDINARY_API.to_string()),
                    timeout: Duration::from_secs(parse("UPLOAD_TIMEOUT_SECS", 30)),
                })
            }
            _ => None,
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(5000),
            database,
            cloudinary,
            upload_folder: lookup("CLOUDINARY_FOLDER")
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string()),
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert!(cfg.database.is_none());
        assert!(cfg.cloudinary.is_none());
        assert_eq!(cfg.upload_folder, DEFAULT_UPLOAD_FOLDER);
        assert!(!cfg.json_logs);
    }

    #[test]
    fn database_pool_settings_are_read() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/inbrief"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "5"),
            ("DB_MIN_CONNECTIONS", "not-a-number"),
        ]);

        let db = cfg.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/inbrief");
        assert_eq!(db.max_connections, 25);
        assert_eq!(db.min_connections, 1);
        assert_eq!(db.acquire_timeout, Duration::from_secs(5));
        assert_eq!(db.max_lifetime, Duration::from_secs(300));
    }

    #[test]
    fn cloudinary_needs_all_credentials() {
        let partial = config(&[("CLOUDINARY_CLOUD_NAME", "demo"), ("CLOUDINARY_API_KEY", "k")]);
        assert!(partial.cloudinary.is_none());

        let full = config(&[
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "k"),
            ("CLOUDINARY_API_SECRET", "s"),
            ("UPLOAD_TIMEOUT_SECS", "12"),
        ]);
        let cloudinary = full.cloudinary.unwrap();
        assert_eq!(cloudinary.cloud_name, "demo");
        assert_eq!(cloudinary.api_base, DEFAULT_CLOUDINARY_API);
        assert_eq!(cloudinary.timeout, Duration::from_secs(12));
    }
}
