use anyhow::Context;
use timecode_core::{Timecode, TimecodeError};

use super::argparse::{ConfigArgs, OutputFormat};
use crate::timecode_config::{ConfigBuilder, TimecodeConfig};

pub(crate) fn get_config(
    config_args: &ConfigArgs,
    output: &OutputFormat,
) -> anyhow::Result<TimecodeConfig> {
    ConfigBuilder::new()
        .context("could not create config builder")?
        .load_environment(!config_args.no_env)
        .config_file(config_args.config.as_deref())
        .context("could not set config file")?
        .separator(output.separator())
        .context("could not set separator")?
        .with_millis(output.with_millis())
        .context("could not set millisecond display")?
        .build()
        .context("could not build config")
}

pub(crate) fn format_with_config(t: Timecode, cfg: &TimecodeConfig) -> anyhow::Result<String> {
    let separator = cfg.separator()?;
    Ok(t.format(cfg.with_millis()?, &separator))
}

pub(crate) fn parse_arg(text: &str) -> Result<Timecode, TimecodeError> {
    let t = timecode_core::parse(text)?;
    log::debug!("{:?} -> {}", text, t);
    Ok(t)
}
