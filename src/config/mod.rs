//! Configuration module for the portal controller.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::{default_teachers, AdminProfile, PortalSeed};
use crate::portal::PortalOptions;
use crate::store::IdStrategy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Profile of the signed-in administrator
    pub admin: AdminProfile,
    /// Optional JSON file replacing the built-in seed records
    pub seed_path: Option<PathBuf>,
    /// How ids are assigned to new teachers
    pub id_strategy: IdStrategy,
    /// Delay between requesting and completing logout
    pub logout_grace: Duration,
    /// Lifetime of a notification before it auto-dismisses
    pub notification_ttl: Duration,
    /// Viewport widths below this are treated as mobile
    pub mobile_breakpoint: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            admin: AdminProfile::default(),
            seed_path: None,
            id_strategy: IdStrategy::Sequential,
            logout_grace: Duration::from_millis(3000),
            notification_ttl: Duration::from_millis(3000),
            mobile_breakpoint: 768,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let bind_addr = parse_var("PORTAL_BIND_ADDR")?.unwrap_or(defaults.bind_addr);

        let log_level = env::var("PORTAL_LOG_LEVEL").unwrap_or(defaults.log_level);

        let admin = AdminProfile {
            name: env::var("PORTAL_ADMIN_NAME").unwrap_or(defaults.admin.name),
            email: env::var("PORTAL_ADMIN_EMAIL").unwrap_or(defaults.admin.email),
        };

        let seed_path = env::var("PORTAL_SEED_PATH").ok().map(PathBuf::from);

        let id_strategy = parse_var("PORTAL_ID_STRATEGY")?.unwrap_or(defaults.id_strategy);

        let logout_grace = parse_var::<u64>("PORTAL_LOGOUT_GRACE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.logout_grace);

        let notification_ttl = parse_var::<u64>("PORTAL_NOTIFICATION_TTL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.notification_ttl);

        let mobile_breakpoint =
            parse_var("PORTAL_MOBILE_BREAKPOINT")?.unwrap_or(defaults.mobile_breakpoint);

        Ok(Self {
            bind_addr,
            log_level,
            admin,
            seed_path,
            id_strategy,
            logout_grace,
            notification_ttl,
            mobile_breakpoint,
        })
    }

    /// Seed records and profile for a new portal.
    pub fn seed(&self) -> Result<PortalSeed, AppError> {
        let teachers = match &self.seed_path {
            Some(path) => PortalSeed::load_teachers(path)?,
            None => default_teachers(),
        };
        Ok(PortalSeed {
            teachers,
            admin: self.admin.clone(),
        })
    }

    pub fn portal_options(&self) -> PortalOptions {
        PortalOptions {
            id_strategy: self.id_strategy,
            logout_grace: self.logout_grace,
            notification_ttl: self.notification_ttl,
            mobile_breakpoint: self.mobile_breakpoint,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 9] = [
        "PORTAL_BIND_ADDR",
        "PORTAL_LOG_LEVEL",
        "PORTAL_ADMIN_NAME",
        "PORTAL_ADMIN_EMAIL",
        "PORTAL_SEED_PATH",
        "PORTAL_ID_STRATEGY",
        "PORTAL_LOGOUT_GRACE_MS",
        "PORTAL_NOTIFICATION_TTL_MS",
        "PORTAL_MOBILE_BREAKPOINT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.admin.name, "Admin User");
        assert_eq!(config.admin.email, "admin@school.edu");
        assert!(config.seed_path.is_none());
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert_eq!(config.logout_grace, Duration::from_millis(3000));
        assert_eq!(config.notification_ttl, Duration::from_millis(3000));
        assert_eq!(config.mobile_breakpoint, 768);
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("PORTAL_BIND_ADDR", "0.0.0.0:9000");
        env::set_var("PORTAL_ID_STRATEGY", "uuid");
        env::set_var("PORTAL_LOGOUT_GRACE_MS", "0");
        env::set_var("PORTAL_MOBILE_BREAKPOINT", "640");
        env::set_var("PORTAL_ADMIN_NAME", "Principal");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.logout_grace, Duration::ZERO);
        assert_eq!(config.mobile_breakpoint, 640);
        assert_eq!(config.admin.name, "Principal");
        assert_eq!(config.portal_options().mobile_breakpoint, 640);
    }

    #[test]
    fn test_malformed_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("PORTAL_LOGOUT_GRACE_MS", "soon");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, AppError::Config(_)));

        env::set_var("PORTAL_BIND_ADDR", "not-an-addr");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_seed_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"10","name":"Anita","email":"anita@school.edu","subject":"Art","status":"Inactive"}}]"#
        )
        .unwrap();

        let config = Config {
            seed_path: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let seed = config.seed().unwrap();
        assert_eq!(seed.teachers.len(), 1);
        assert_eq!(seed.teachers[0].name, "Anita");

        let seed = Config::default().seed().unwrap();
        assert_eq!(seed.teachers.len(), 3);
    }
}
