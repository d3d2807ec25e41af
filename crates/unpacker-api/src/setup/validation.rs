//! Configuration validation

use anyhow::Result;
use unpacker_core::Config;

/// Validate critical configuration values before anything talks to Nextcloud.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.nextcloud_url().starts_with("http://") {
        tracing::warn!("NEXTCLOUD_URL uses plain http in production - the AppAPI secret travels unencrypted");
    }

    if config.scratch_dir().as_os_str().is_empty() {
        return Err(anyhow::anyhow!("SCRATCH_DIR must not be empty"));
    }

    if config.scratch_dir().parent().is_none() {
        return Err(anyhow::anyhow!(
            "SCRATCH_DIR must not be the filesystem root - it is wiped on startup"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use unpacker_core::{BaseConfig, ExAppConfig};

    fn config(scratch_dir: &str) -> Config {
        Config(Box::new(ExAppConfig {
            base: BaseConfig {
                server_host: "127.0.0.1".into(),
                server_port: 9080,
                environment: "development".into(),
                http_timeout_secs: 30,
            },
            nextcloud_url: "http://nextcloud.local".into(),
            app_id: "unpacker".into(),
            app_version: "1.0.0".into(),
            app_secret: "secret".into(),
            scratch_dir: PathBuf::from(scratch_dir),
        }))
    }

    #[test]
    fn test_rejects_root_scratch_dir() {
        assert!(validate_config(&config("/")).is_err());
        assert!(validate_config(&config("")).is_err());
        assert!(validate_config(&config("/tmp/Extracted")).is_ok());
    }
}
