// ============================================================================
// Service Configuration
// ============================================================================
//
// Read from the environment, with `.env` support through `dotenv`.
// Parsing goes through a lookup closure so it can be tested without touching
// the process environment.
//
// ============================================================================

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8090";
pub const DEFAULT_KEYSPACE: &str = "orders_ks";
pub const DEFAULT_REPLICATION_FACTOR: u32 = 1;

const DATABASE_URI_ENV: &str = "DATABASE_URI";
const DATABASE_KEYSPACE_ENV: &str = "DATABASE_KEYSPACE";
const DATABASE_REPLICATION_FACTOR_ENV: &str = "DATABASE_REPLICATION_FACTOR";
const HOST_ENV: &str = "HOST";
const PORT_ENV: &str = "PORT";
const FRONTEND_ORIGIN_ENV: &str = "FRONTEND_ORIGIN";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the order store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub known_nodes: Vec<String>,
    pub keyspace: String,
    pub replication_factor: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store: StoreConfig,
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let known_nodes: Vec<String> = get(DATABASE_URI_ENV)
            .ok_or(ConfigError::Missing(DATABASE_URI_ENV))?
            .split(',')
            .map(|node| node.trim().to_string())
            .filter(|node| !node.is_empty())
            .collect();
        if known_nodes.is_empty() {
            return Err(ConfigError::Missing(DATABASE_URI_ENV));
        }

        let keyspace = get(DATABASE_KEYSPACE_ENV).unwrap_or_else(|| DEFAULT_KEYSPACE.to_string());
        validate_keyspace(&keyspace)?;

        let replication_factor = match get(DATABASE_REPLICATION_FACTOR_ENV) {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|rf| *rf > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: DATABASE_REPLICATION_FACTOR_ENV,
                    reason: format!("'{raw}' is not a positive integer"),
                })?,
            None => DEFAULT_REPLICATION_FACTOR,
        };

        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                reason: format!("'{raw}': {e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let allowed_origin =
            get(FRONTEND_ORIGIN_ENV).unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        validate_origin(&allowed_origin)?;

        Ok(Self {
            store: StoreConfig {
                known_nodes,
                keyspace,
                replication_factor,
            },
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origin,
        })
    }
}

// CQL identifiers cannot be bound as parameters, so the keyspace ends up
// formatted into DDL and must stay a plain identifier.
fn validate_keyspace(keyspace: &str) -> Result<(), ConfigError> {
    let valid = keyspace.len() <= 48
        && keyspace.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && keyspace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var: DATABASE_KEYSPACE_ENV,
            reason: format!("'{keyspace}' is not a valid keyspace name"),
        })
    }
}

fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    let valid = has_scheme
        && !origin.ends_with('/')
        && origin.chars().all(|c| c.is_ascii_graphic());

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var: FRONTEND_ORIGIN_ENV,
            reason: format!("'{origin}' is not a scheme://host[:port] origin"),
        })
    }
}
