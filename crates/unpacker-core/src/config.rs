//! Configuration module
//!
//! Everything the service needs from its environment is read once at startup
//! into a [`Config`] value. The config is then handed to every collaborator that
//! talks to Nextcloud instead of being looked up from process state at call sites.

use std::env;
use std::path::PathBuf;

use crate::app_api::AppApiCredentials;
use crate::constants::SCRATCH_DIR_NAME;

// Common constants
const APP_HOST: &str = "127.0.0.1";
const APP_PORT: u16 = 9080;
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Server-level settings that are not specific to the Nextcloud instance.
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub http_timeout_secs: u64,
}

/// ExApp identity and instance settings.
#[derive(Clone, Debug)]
pub struct ExAppConfig {
    pub base: BaseConfig,
    /// Instance base URL without `/index.php` and without a trailing slash.
    pub nextcloud_url: String,
    pub app_id: String,
    pub app_version: String,
    pub app_secret: String,
    /// Root under which every job creates its private scratch directory.
    pub scratch_dir: PathBuf,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ExAppConfig>);

impl Config {
    fn as_exapp(&self) -> &ExAppConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ExAppConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_exapp().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_exapp().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_host(&self) -> &str {
        &self.as_exapp().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.as_exapp().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_exapp().base.environment
    }

    pub fn http_timeout_secs(&self) -> u64 {
        self.as_exapp().base.http_timeout_secs
    }

    pub fn nextcloud_url(&self) -> &str {
        &self.as_exapp().nextcloud_url
    }

    pub fn app_id(&self) -> &str {
        &self.as_exapp().app_id
    }

    pub fn app_version(&self) -> &str {
        &self.as_exapp().app_version
    }

    pub fn scratch_dir(&self) -> &PathBuf {
        &self.as_exapp().scratch_dir
    }

    /// Credentials used to sign outbound calls and verify inbound ones.
    pub fn credentials(&self) -> AppApiCredentials {
        let exapp = self.as_exapp();
        AppApiCredentials::new(
            exapp.app_id.clone(),
            exapp.app_version.clone(),
            exapp.app_secret.clone(),
        )
    }
}

/// Strip `/index.php` and trailing slashes from an instance URL.
pub fn normalize_nextcloud_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/index.php")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

fn required_var(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} must be set", name))
}

impl ExAppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_host = env::var("APP_HOST").unwrap_or_else(|_| APP_HOST.to_string());

        let server_port = env::var("APP_PORT")
            .unwrap_or_else(|_| APP_PORT.to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("APP_PORT must be a valid port number: {}", e))?;

        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| HTTP_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(HTTP_TIMEOUT_SECS);

        let nextcloud_url = normalize_nextcloud_url(&required_var("NEXTCLOUD_URL")?);
        let app_id = required_var("APP_ID")?;
        let app_version = required_var("APP_VERSION")?;
        let app_secret = required_var("APP_SECRET")?;

        let scratch_dir = env::var("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join(SCRATCH_DIR_NAME));

        Ok(ExAppConfig {
            base: BaseConfig {
                server_host,
                server_port,
                environment,
                http_timeout_secs,
            },
            nextcloud_url,
            app_id,
            app_version,
            app_secret,
            scratch_dir,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.nextcloud_url.starts_with("http://") && !self.nextcloud_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "NEXTCLOUD_URL must be an http:// or https:// URL, got '{}'",
                self.nextcloud_url
            ));
        }

        if self.app_id.trim().is_empty() {
            return Err(anyhow::anyhow!("APP_ID must not be empty"));
        }

        if self.app_secret.is_empty() {
            return Err(anyhow::anyhow!("APP_SECRET must not be empty"));
        }

        if self.base.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
