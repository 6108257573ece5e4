mod commands;
mod terminal;

use commands::{CommandLine, Commands, analyze, lookup};
use proxyscope_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg: Config = commands.config();

    if commands.is_json() {
        logging::init_logging("warn", true);
    } else {
        logging::init_logging(&logging::directives_for(cfg.quiet), false);
        print::banner(cfg.no_banner, cfg.quiet);
    }

    match commands.command {
        Commands::Analyze(args) => {
            print::header("preparing batch", cfg.quiet);
            analyze::analyze(args, &cfg).await
        }
        Commands::Lookup { address } => {
            print::header("resolving address", cfg.quiet);
            lookup::lookup(&address, &cfg).await
        }
    }
}
