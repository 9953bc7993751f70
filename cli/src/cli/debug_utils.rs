use super::{argparse, helpers};

impl argparse::ShowConfig {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let cfg = helpers::get_config(&self.config, &self.output)?;
        println!("separator: {:?}", cfg.separator()?);
        println!("with_millis: {}", cfg.with_millis()?);
        Ok(())
    }
}
