use tilefinder::cli::commands::{CliArgs, Commands};
use tilefinder::cli::handlers::{handle_config, handle_fetch, handle_list, handle_metadata};
use tilefinder::util::logging::{init_logging, parse_level, LoggingConfig};
use tilefinder::{FinderConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let config = FinderConfig::default();
    init_logging_from_args(&args);

    debug!("tilefinder v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Fetch(fetch_args) => handle_fetch(fetch_args, config),
        Commands::List(list_args) => handle_list(list_args, config),
        Commands::Metadata(metadata_args) => handle_metadata(metadata_args, config),
        Commands::Config(config_args) => handle_config(config_args, config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut logging = LoggingConfig::from_env();
    if let Some(level_str) = &args.log_level {
        logging.level = parse_level(level_str);
    } else if args.verbose {
        logging.level = Level::DEBUG;
    } else if args.quiet {
        logging.level = Level::ERROR;
    }
    init_logging(logging);
}
