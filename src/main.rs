use std::{fs, io, path::PathBuf, process::ExitCode};

use cache_hierarchy::{
    input::{AddressFile, Interactive},
    report,
    session::{self, simulate},
    Config, SimResult,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> SimResult<()> {
    let mut args = pico_args::Arguments::from_env();
    let addr_per_block: usize = args
        .opt_value_from_str("--buffer-size")
        .map_err(arg_error)?
        .unwrap_or(1024);
    let blocks_per_queue: usize = args
        .opt_value_from_str("--queue-size")
        .map_err(arg_error)?
        .unwrap_or(32);
    let no_interactive = args.contains("--no-interactive");
    let stats_path: Option<PathBuf> = args.opt_value_from_str("--json").map_err(arg_error)?;
    let trace_path: PathBuf = args
        .opt_value_from_str("-t")
        .map_err(arg_error)?
        .unwrap_or_else(|| PathBuf::from("addresses.txt"));

    let config = if let Some(config_str) = args
        .opt_value_from_str::<_, String>("--config")
        .map_err(arg_error)?
    {
        Config::from_json(&config_str)?
    } else if let Some(config_path) = args
        .opt_value_from_str::<_, PathBuf>("-p")
        .map_err(arg_error)?
    {
        Config::from_json(&fs::read_to_string(config_path)?)?
    } else {
        Config::default()
    };
    for extra in args.finish() {
        log::warn!("ignoring unexpected argument {:?}", extra);
    }

    let mut hierarchy = config.to_hierarchy()?;
    let stdout = io::stdout();

    match AddressFile::read(trace_path.clone(), addr_per_block, blocks_per_queue) {
        Ok(file) => {
            log::info!("reading addresses from {}", trace_path.display());
            for raw in file.iter() {
                simulate(&mut hierarchy, raw, &mut stdout.lock())?;
            }
        }
        Err(err) => {
            log::info!("cannot open {}: {}", trace_path.display(), err);
            println!("{}", session::missing_file_notice(&trace_path));
        }
    }

    if !no_interactive {
        let stdin = io::stdin();
        let mut source = Interactive::new(stdin.lock(), io::stdout());
        while let Some(raw) = source.next_address()? {
            simulate(&mut hierarchy, raw, &mut stdout.lock())?;
        }
    }

    print!("{}", report::render_stats(&hierarchy.stats()));
    if let Some(stats_path) = stats_path {
        let stats_file = fs::File::create(stats_path)?;
        serde_json::to_writer_pretty(stats_file, &hierarchy.stats())?;
    }
    Ok(())
}

fn arg_error(err: pico_args::Error) -> cache_hierarchy::SimError {
    cache_hierarchy::SimError::InvalidConfig(format!("bad command line: {}", err))
}
