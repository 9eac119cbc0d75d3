use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Conventional variable names that override a config key directly
const WELL_KNOWN_VARS: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "jwt.secret"),
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "cache.redis.url"),
    ("REDIS_KEY_PREFIX", "cache.redis.key_prefix"),
    ("REDIS_TTL", "cache.default_ttl"),
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USERNAME", "smtp.username"),
    ("SMTP_PASSWORD", "smtp.password"),
    ("BACKUP_DIR", "backup.dir"),
];

fn environment_name() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
}

impl AppConfig {
    /// `config.toml`, then `config.<APP_ENV>.toml`, then `GRADESYS_*`, then [`WELL_KNOWN_VARS`]
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{}", environment_name())).required(false))
            .add_source(
                Environment::with_prefix("GRADESYS")
                    .separator("_")
                    .try_parsing(true),
            );

        for (var, key) in WELL_KNOWN_VARS {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        // 0 means one worker per core
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// Global configuration instance
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// Initialize at startup
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// Production environment
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// Development environment
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// `host:port` to bind
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Unix socket path, if configured
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WELL_KNOWN_VARS;
    use std::collections::HashSet;

    #[test]
    fn well_known_vars_map_to_distinct_keys() {
        let keys: HashSet<_> = WELL_KNOWN_VARS.iter().map(|(_, key)| key).collect();
        assert_eq!(keys.len(), WELL_KNOWN_VARS.len());
        assert!(
            WELL_KNOWN_VARS
                .iter()
                .any(|&(var, key)| var == "DATABASE_URL" && key == "database.url")
        );
    }
}
