pub mod argparse;
mod convert;
mod debug_utils;
mod helpers;

impl argparse::CliOpts {
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.subcmd {
            argparse::SubCommand::Parse(cmd) => cmd.run(),
            argparse::SubCommand::Format(cmd) => cmd.run(),
            argparse::SubCommand::Shift(cmd) => cmd.run(),
            argparse::SubCommand::Components(cmd) => cmd.run(),
            argparse::SubCommand::Debug(sub) => match sub {
                argparse::DebugCommand::ShowConfig(cmd) => cmd.run(),
            },
        }
    }
}

pub use argparse::get_args;
