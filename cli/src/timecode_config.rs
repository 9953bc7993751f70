use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "vauntware";
const APP: &str = "timecode";
const APP_CAPS: &str = "TIMECODE";

const SEPARATOR_KEY: &str = "separator";
const DEFAULT_SEPARATOR: &str = ".";

const WITH_MILLIS_KEY: &str = "with_millis";

const DEFAULT_CONFIG_FILE: &str = "timecode.toml";

type ExtConfigBuilder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error("unable to get user home directory")]
    NoUserHome,
    #[error("path is not utf8: {:?}", _0)]
    NonUtf8Path(PathBuf),
    #[error("config file does not exist: {}", _0)]
    MissingConfigFile(Utf8PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_dir: Option<Utf8PathBuf>,
    config_path: Option<Utf8PathBuf>,
    load_environment: bool,
    config_builder: ExtConfigBuilder,
}

fn camino_path(std_path: &Path) -> Result<&Utf8Path, ConfigError> {
    Utf8Path::from_path(std_path).ok_or_else(|| ConfigError::NonUtf8Path(std_path.to_path_buf()))
}

fn new_config_builder() -> Result<ExtConfigBuilder, ConfigError> {
    Ok(config::Config::builder()
        .set_default(SEPARATOR_KEY, DEFAULT_SEPARATOR)?
        .set_default(WITH_MILLIS_KEY, true)?)
}

impl ConfigBuilder {
    /// Only the built-in defaults: no user config directory, no environment.
    pub fn new_defaults() -> Result<Self, ConfigError> {
        Ok(Self {
            load_environment: false,
            config_path: None,
            config_dir: None,
            config_builder: new_config_builder()?,
        })
    }

    pub fn new() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APP)
            .ok_or(ConfigError::NoUserHome)?;
        let config_dir = camino_path(dirs.config_dir())?.to_path_buf();
        let mut builder = Self::new_defaults()?;
        builder.config_dir = Some(config_dir);
        Ok(builder)
    }

    /// Should we load configuration from the environment?
    pub fn load_environment(mut self, load_environment: bool) -> Self {
        self.load_environment = load_environment;
        self
    }

    pub fn config_file(mut self, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        self.config_path = config_file
            .map(|p| camino_path(p).map(|p| p.to_path_buf()))
            .transpose()?;
        Ok(self)
    }

    pub fn separator(mut self, separator: Option<&str>) -> Result<Self, ConfigError> {
        self.config_builder = self
            .config_builder
            .set_override_option(SEPARATOR_KEY, separator)?;
        Ok(self)
    }

    pub fn with_millis(mut self, with_millis: Option<bool>) -> Result<Self, ConfigError> {
        self.config_builder = self
            .config_builder
            .set_override_option(WITH_MILLIS_KEY, with_millis)?;
        Ok(self)
    }

    pub fn build(mut self) -> Result<TimecodeConfig, ConfigError> {
        // an explicit file must exist, the default location is optional
        if let Some(cfg_file) = self.config_path.take() {
            if !cfg_file.exists() {
                return Err(ConfigError::MissingConfigFile(cfg_file));
            }
            self.config_builder = self
                .config_builder
                .add_source(config::File::from(cfg_file.as_std_path()));
        } else if let Some(dir) = self.config_dir.as_ref() {
            let cfg_file = dir.join(DEFAULT_CONFIG_FILE);
            if cfg_file.exists() {
                log::debug!("loading config from {}", cfg_file);
                self.config_builder = self
                    .config_builder
                    .add_source(config::File::from(cfg_file.as_std_path()));
            }
        }

        if self.load_environment {
            self.config_builder = self
                .config_builder
                .add_source(config::Environment::with_prefix(APP_CAPS))
        }

        let timecode_cfg = TimecodeConfig {
            inner: self.config_builder.build()?,
        };
        log::trace!("{:#?}", timecode_cfg);
        Ok(timecode_cfg)
    }
}

#[derive(Debug, Clone)]
pub struct TimecodeConfig {
    inner: config::Config,
}

impl TimecodeConfig {
    /// Text placed between seconds and milliseconds when formatting.
    pub fn separator(&self) -> Result<String, ConfigError> {
        Ok(self.inner.get_string(SEPARATOR_KEY)?)
    }

    pub fn with_millis(&self) -> Result<bool, ConfigError> {
        Ok(self.inner.get_bool(WITH_MILLIS_KEY)?)
    }
}
