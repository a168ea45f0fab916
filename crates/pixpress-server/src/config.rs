//! Service configuration.
//!
//! Configuration is loaded from an optional YAML file with environment
//! variable overrides. The file path defaults to `config.yaml` and can be set
//! with `-f` or `PIXPRESS_CONFIG`.
//!
//! ## Loading Priority
//!
//! Later sources override earlier ones:
//!
//! 1. **YAML config file** (default: `config.yaml`, may be absent)
//! 2. **Legacy variables** `PORT`, `MAX_FILE_SIZE` and `DEFAULT_QUALITY`
//! 3. **`PIXPRESS_` variables**, nested with double underscores
//!
//! ```bash
//! PIXPRESS_PORT=8080
//! PIXPRESS_PIPELINE__MAX_FILE_SIZE=10485760
//! PIXPRESS_PIPELINE__DEFAULT_QUALITY=70
//! ```

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use pixpress_core::PipelineConfig;
use serde::{Deserialize, Serialize};

/// CLI args: where to find the config file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "PIXPRESS_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Allow cross-origin requests from any origin.
    pub cors_allow_any: bool,
    /// Limits and defaults handed to the compression pipeline.
    pub pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_allow_any: true,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config
            .pipeline
            .validate()
            .map_err(|e| figment::Error::from(format!("Invalid pipeline config: {e}")))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::raw().only(&["PORT"]))
            .merge(
                Env::raw()
                    .only(&["MAX_FILE_SIZE", "DEFAULT_QUALITY"])
                    .map(|key| format!("pipeline.{key}").into()),
            )
            // PIXPRESS_CONFIG names the file and is not itself a setting
            .merge(Env::prefixed("PIXPRESS_").ignore(&["CONFIG"]).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("missing.yaml"))?;
            assert_eq!(config, Config::default());
            assert_eq!(config.bind_address(), "0.0.0.0:3001");
            assert_eq!(config.pipeline.max_file_size, 5 * 1024 * 1024);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
host: 127.0.0.1
port: 8080
cors_allow_any: false
pipeline:
  max_file_size: 1048576
  default_quality: 60
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.bind_address(), "127.0.0.1:8080");
            assert!(!config.cors_allow_any);
            assert_eq!(config.pipeline.max_file_size, 1024 * 1024);
            assert_eq!(config.pipeline.default_quality, 60);
            assert_eq!(config.pipeline.allowed_mime_types.len(), 3);
            Ok(())
        });
    }

    #[test]
    fn test_legacy_env_vars() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "4000");
            jail.set_env("MAX_FILE_SIZE", "2097152");
            jail.set_env("DEFAULT_QUALITY", "55");

            let config = Config::load(&args("missing.yaml"))?;
            assert_eq!(config.port, 4000);
            assert_eq!(config.pipeline.max_file_size, 2 * 1024 * 1024);
            assert_eq!(config.pipeline.default_quality, 55);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides_legacy_and_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "port: 5000\n")?;
            jail.set_env("PORT", "4000");
            jail.set_env("PIXPRESS_PORT", "9000");
            jail.set_env("PIXPRESS_PIPELINE__DEFAULT_QUALITY", "30");
            jail.set_env("PIXPRESS_CONFIG", "test.yaml");

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.port, 9000);
            assert_eq!(config.pipeline.default_quality, 30);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_field_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "colour_depth: 12\n")?;
            assert!(Config::load(&args("test.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_invalid_pipeline_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
pipeline:
  default_quality: 150
"#,
            )?;
            let err = Config::load(&args("test.yaml")).unwrap_err();
            assert!(err.to_string().contains("Invalid pipeline config"));
            Ok(())
        });
    }
}
