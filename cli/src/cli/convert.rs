use anyhow::Context;
use timecode_core::{Timecode, TimecodeError};

use super::{
    argparse::{ComponentsCommand, FormatCommand, ParseCommand, ShiftCommand},
    helpers,
};
use crate::timecode_config::TimecodeConfig;

fn json_summary(t: Timecode) -> serde_json::Value {
    serde_json::json!({
        "millis": t.as_millis(),
        "negative": t.is_negative(),
        "components": t.components(),
    })
}

impl ParseCommand {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        for line in self.render()? {
            println!("{}", line);
        }
        Ok(())
    }

    fn render(&self) -> anyhow::Result<Vec<String>> {
        let text = self.text.join(" ");
        let found = if self.all {
            let all = timecode_core::parse_all(&text).collect::<Vec<_>>();
            if all.is_empty() {
                return Err(TimecodeError::Malformed(text).into());
            }
            all
        } else {
            vec![helpers::parse_arg(&text)?]
        };
        log::info!("found {} timecode(s)", found.len());

        found
            .into_iter()
            .map(|t| {
                if self.json {
                    serde_json::to_string(&json_summary(t)).context("could not serialize timecode")
                } else {
                    Ok(t.as_millis().to_string())
                }
            })
            .collect()
    }
}

impl FormatCommand {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let cfg = helpers::get_config(&self.config, &self.output)?;
        println!("{}", self.render(&cfg)?);
        Ok(())
    }

    fn render(&self, cfg: &TimecodeConfig) -> anyhow::Result<String> {
        helpers::format_with_config(Timecode::from_millis(self.millis), cfg)
    }
}

impl ShiftCommand {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        let cfg = helpers::get_config(&self.config, &self.output)?;
        println!("{}", self.render(&cfg)?);
        Ok(())
    }

    fn render(&self, cfg: &TimecodeConfig) -> anyhow::Result<String> {
        let start = helpers::parse_arg(&self.text).context("invalid timecode to shift")?;
        let offset = helpers::parse_arg(&self.by).context("invalid offset")?;
        helpers::format_with_config(start + offset, cfg)
    }
}

impl ComponentsCommand {
    pub(crate) fn run(&self) -> anyhow::Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> anyhow::Result<String> {
        let t = helpers::parse_arg(&self.text)?;
        if self.json {
            return serde_json::to_string_pretty(&json_summary(t))
                .context("could not serialize timecode");
        }
        let c = t.components();
        Ok(format!(
            "negative: {}\nhours: {}\nminutes: {}\nseconds: {}\nmillis: {}",
            t.is_negative(),
            c.hours,
            c.minutes,
            c.seconds,
            c.millis
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::argparse::{ConfigArgs, OutputFormat},
        timecode_config::ConfigBuilder,
    };

    fn output(comma: bool, no_millis: bool) -> OutputFormat {
        OutputFormat {
            comma,
            separator: None,
            no_millis,
        }
    }

    fn config_for(output: &OutputFormat) -> TimecodeConfig {
        ConfigBuilder::new_defaults()
            .unwrap()
            .separator(output.separator())
            .unwrap()
            .with_millis(output.with_millis())
            .unwrap()
            .build()
            .unwrap()
    }

    fn no_config() -> ConfigArgs {
        ConfigArgs {
            config: None,
            no_env: true,
        }
    }

    fn parse_cmd(text: &str, all: bool, json: bool) -> ParseCommand {
        ParseCommand {
            text: text.split(' ').map(String::from).collect(),
            all,
            json,
        }
    }

    #[test]
    fn parse_first_match() {
        let cmd = parse_cmd("cue at -01:02:03.456 and 00:00:01", false, false);
        assert_eq!(cmd.render().unwrap(), vec!["-3723456".to_owned()]);
    }

    #[test]
    fn parse_every_match() {
        let cmd = parse_cmd("00:00:01,000 --> 00:00:04,250", true, false);
        assert_eq!(
            cmd.render().unwrap(),
            vec!["1000".to_owned(), "4250".to_owned()]
        );
    }

    #[test]
    fn parse_json() {
        let cmd = parse_cmd("00:00:01.500", false, true);
        let out = cmd.render().unwrap();
        let v: serde_json::Value = serde_json::from_str(&out[0]).unwrap();
        assert_eq!(v["millis"], 1500);
        assert_eq!(v["negative"], false);
        assert_eq!(v["components"]["seconds"], 1);
        assert_eq!(v["components"]["millis"], 500);
    }

    #[test]
    fn parse_nothing_fails() {
        assert!(parse_cmd("not.a.timecode", false, false).render().is_err());
        assert!(parse_cmd("not.a.timecode", true, false).render().is_err());
    }

    #[test]
    fn format_default_dot() {
        let output = output(false, false);
        let cfg = config_for(&output);
        let cmd = FormatCommand {
            millis: -3_723_004,
            output,
            config: no_config(),
        };
        assert_eq!(cmd.render(&cfg).unwrap(), "-01:02:03.004");
    }

    #[test]
    fn format_comma_and_no_millis() {
        let comma = output(true, false);
        let cfg = config_for(&comma);
        let cmd = FormatCommand {
            millis: 1500,
            output: comma,
            config: no_config(),
        };
        assert_eq!(cmd.render(&cfg).unwrap(), "00:00:01,500");

        let bare = output(false, true);
        let cfg = config_for(&bare);
        let cmd = FormatCommand {
            millis: 1500,
            output: bare,
            config: no_config(),
        };
        assert_eq!(cmd.render(&cfg).unwrap(), "00:00:01");
    }

    #[test]
    fn shift_backwards_past_zero() {
        let output = output(false, false);
        let cfg = config_for(&output);
        let cmd = ShiftCommand {
            text: "00:00:01.000".to_owned(),
            by: "-00:00:02.500".to_owned(),
            output,
            config: no_config(),
        };
        assert_eq!(cmd.render(&cfg).unwrap(), "-00:00:01.500");
    }

    #[test]
    fn shift_rejects_bad_offset() {
        let output = output(false, false);
        let cfg = config_for(&output);
        let cmd = ShiftCommand {
            text: "00:00:01".to_owned(),
            by: "2s".to_owned(),
            output,
            config: no_config(),
        };
        assert!(cmd.render(&cfg).is_err());
    }

    #[test]
    fn components_text() {
        let cmd = ComponentsCommand {
            text: "-01:02:03,004".to_owned(),
            json: false,
        };
        assert_eq!(
            cmd.render().unwrap(),
            "negative: true\nhours: 1\nminutes: 2\nseconds: 3\nmillis: 4"
        );
    }
}
