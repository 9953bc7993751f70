use clap::{Args, Parser, Subcommand};

pub fn get_args() -> CliOpts {
    CliOpts::parse()
}

#[derive(Parser, Debug)]
#[clap(version = clap::crate_version!(), author = "Scott S. <scottschroeder@sent.com>")]
pub struct CliOpts {
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Find the timecode in some text and print it in milliseconds
    Parse(ParseCommand),

    /// Print a millisecond count as a timecode
    Format(FormatCommand),

    /// Move a timecode forward or backward by an offset
    Shift(ShiftCommand),

    /// Break a timecode into hours, minutes, seconds and milliseconds
    Components(ComponentsCommand),

    /// Debugging Utilities
    #[clap(subcommand)]
    Debug(DebugCommand),
}

#[derive(Subcommand, Debug)]
pub enum DebugCommand {
    /// Show the resolved configuration for the given settings.
    ShowConfig(ShowConfig),
}

#[derive(Args, Debug)]
pub struct ParseCommand {
    /// Text containing a timecode, e.g. `00:01:02,500`
    ///
    /// Put text starting with `-` after `--`, e.g. `parse -- -00:00:01`
    #[clap(required = true)]
    pub text: Vec<String>,

    /// Report every timecode found, not just the first
    #[clap(long)]
    pub all: bool,

    /// Print json instead of plain millisecond counts
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FormatCommand {
    /// Signed number of milliseconds
    #[clap(allow_negative_numbers = true)]
    pub millis: i64,

    #[clap(flatten)]
    pub output: OutputFormat,

    #[clap(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ShiftCommand {
    /// Text containing the timecode to move
    #[clap(allow_hyphen_values = true)]
    pub text: String,

    /// Offset to add, e.g. `00:00:01.500` or `-00:00:02`
    #[clap(long, allow_hyphen_values = true)]
    pub by: String,

    #[clap(flatten)]
    pub output: OutputFormat,

    #[clap(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ComponentsCommand {
    /// Text containing a timecode
    #[clap(allow_hyphen_values = true)]
    pub text: String,

    /// Print json instead of plain text
    #[clap(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowConfig {
    #[clap(flatten)]
    pub output: OutputFormat,

    #[clap(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct OutputFormat {
    /// Separate milliseconds with a comma (SubRip style)
    #[clap(long, conflicts_with = "separator")]
    pub comma: bool,

    /// Text placed between seconds and milliseconds
    #[clap(long)]
    pub separator: Option<String>,

    /// Leave milliseconds off entirely
    #[clap(long)]
    pub no_millis: bool,
}

impl OutputFormat {
    pub fn separator(&self) -> Option<&str> {
        if self.comma {
            Some(",")
        } else {
            self.separator.as_deref()
        }
    }

    pub fn with_millis(&self) -> Option<bool> {
        if self.no_millis {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a toml config file.
    ///
    /// If not provided, will look for `timecode.toml` in the user config dir.
    #[clap(long)]
    pub config: Option<std::path::PathBuf>,

    /// Ignore `TIMECODE_*` environment variables
    #[clap(long)]
    pub no_env: bool,
}
