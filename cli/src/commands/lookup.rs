use std::time::Instant;

use colored::*;
use proxyscope_common::config::Config;
use proxyscope_common::lookup::LookupProvider;
use proxyscope_common::models::record::AddressRecord;
use tracing::info;

use crate::commands;
use crate::terminal::{format, print};

pub async fn lookup(address: &str, cfg: &Config) -> anyhow::Result<()> {
    let address: &str = address.trim();
    anyhow::ensure!(!address.is_empty(), "no address given");

    let provider = commands::lookup_provider(cfg)?;
    let start_time: Instant = Instant::now();
    let record: AddressRecord = provider.resolve(address).await;
    let elapsed: f64 = start_time.elapsed().as_secs_f64();

    print::header("lookup result", cfg.quiet);
    match cfg.quiet {
        0 => {
            print::tree_head(0, &format::address_to_colored(&record));
            print::as_tree_one_level(format::record_to_details(&record));
            print::end_of_program();
        }
        _ => print::print_status(format::record_to_line(&record)),
    }

    info!("resolved in {}", format!("{elapsed:.2}s").bold().yellow());
    Ok(())
}
