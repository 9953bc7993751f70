mod cli;
mod timecode_config;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    let args = cli::get_args();
    setup_logger(args.verbose);
    log::trace!("Args: {:?}", args);

    args.run().map_err(|e| {
        log::error!("{:?}", e);
        anyhow::anyhow!("unrecoverable {} failure", clap::crate_name!())
    })
}

pub fn setup_logger(level: u8) {
    let mut builder = pretty_env_logger::formatted_timed_builder();

    let log_level = match level {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    builder.filter_level(log_level);
    builder.format_timestamp_millis();
    builder.init();
}
