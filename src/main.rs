use clap::Parser;
use cycle_profiler::{Cli, run_cli};
use std::panic;

fn main() -> anyhow::Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let args = Cli::parse();

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };
    let my_code_level = match args.verbose {
        0 => my_code_level,
        1 => my_code_level.max(log::LevelFilter::Info),
        _ => log::LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("cycle_profiler"), my_code_level)
        .init();

    run_cli(args)
}
