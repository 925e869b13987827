use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env::vars;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub enum Env {
    #[default]
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "prod")]
    Prod,
}

impl Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Env::Local => write!(f, "local"),
            Env::Prod => write!(f, "prod"),
        }
    }
}

/// Where the PostgreSQL connection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// `DATABASE_URL`, used verbatim.
    Url(String),
    /// Assembled from the `DB_*` variables.
    Parts {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
        name: Option<String>,
        ssl_mode: String,
    },
}

impl DatabaseSource {
    /// Builds sqlx connection options for this source.
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        match self {
            DatabaseSource::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            DatabaseSource::Parts {
                host,
                port,
                user,
                password,
                name,
                ssl_mode,
            } => {
                let mut options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .ssl_mode(PgSslMode::from_str(ssl_mode)?);
                if let Some(user) = user {
                    options = options.username(user);
                }
                if let Some(password) = password {
                    options = options.password(password);
                }
                if let Some(name) = name {
                    options = options.database(name);
                }
                Ok(options)
            }
        }
    }
}

// The final, validated configuration struct.
#[derive(Debug, Clone)]
pub struct Config {
    env: Env,
    database: DatabaseSource,
    server_addr: String,
    port: u16,
    upload_dir: PathBuf,
}

// Raw environment variables; everything optional so defaults can be applied
// in one place.
#[derive(Deserialize)]
struct RawConfig {
    env: Option<Env>,
    database_url: Option<String>,
    db_host: Option<String>,
    db_port: Option<u16>,
    db_user: Option<String>,
    db_password: Option<String>,
    db_name: Option<String>,
    db_sslmode: Option<String>,
    server_addr: Option<String>,
    port: Option<u16>,
    upload_dir: Option<PathBuf>,
}

impl Config {
    /// Create a test configuration with default values.
    ///
    /// This function is available for both unit tests and integration tests.
    /// It should not be used in production code.
    pub fn new_for_test(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            env: Env::Local,
            database: DatabaseSource::Url("postgres://localhost:5432/test".to_owned()),
            server_addr: "127.0.0.1".to_owned(),
            port: 8080,
            upload_dir: upload_dir.into(),
        }
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    pub fn database(&self) -> &DatabaseSource {
        &self.database
    }

    pub fn server_addr(&self) -> &str {
        &self.server_addr
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn is_local(&self) -> bool {
        matches!(self.env, Env::Local)
    }

    /// Initializes configuration by reading from environment variables
    /// and applying environment-aware defaults.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");

        let raw_config: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw_config)
    }

    fn from_raw(raw_config: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            env,
            database_url,
            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            db_sslmode,
            server_addr,
            port,
            upload_dir,
        } = raw_config;

        let env = env.unwrap_or_default();

        let server_addr = match server_addr {
            Some(addr) => {
                info!("Using provided SERVER_ADDR: {}", addr);
                addr
            }
            None => {
                let default_addr = match env {
                    Env::Local => "127.0.0.1",
                    Env::Prod => "0.0.0.0",
                };
                info!(
                    "SERVER_ADDR not set, defaulting to {} for {} environment",
                    default_addr, env
                );
                default_addr.to_owned()
            }
        };

        let port = port.unwrap_or_else(|| {
            info!("PORT not set, defaulting to 8080");
            8080
        });

        let database = match database_url {
            Some(url) => DatabaseSource::Url(url),
            None => {
                let ssl_mode = db_sslmode.unwrap_or_else(|| "disable".to_owned());
                if PgSslMode::from_str(&ssl_mode).is_err() {
                    anyhow::bail!("DB_SSLMODE has an unknown value: {}", ssl_mode);
                }
                info!("DATABASE_URL not set, using DB_* variables");
                DatabaseSource::Parts {
                    host: db_host.unwrap_or_else(|| "localhost".to_owned()),
                    port: db_port.unwrap_or(5432),
                    user: db_user,
                    password: db_password,
                    name: db_name,
                    ssl_mode,
                }
            }
        };

        let upload_dir = upload_dir.unwrap_or_else(|| PathBuf::from("./uploads"));

        Ok(Config {
            env,
            database,
            server_addr,
            port,
            upload_dir,
        })
    }
}
