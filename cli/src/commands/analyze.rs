use std::io::{IsTerminal, Read};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use proxyscope_common::config::Config;
use proxyscope_common::models::insight::{Insight, InsightOutcome};
use proxyscope_common::models::record::AddressRecord;
use proxyscope_common::models::stats::{BatchStats, LocationCount};
use proxyscope_core::classifier::{BatchClassifier, tokenize};
use proxyscope_core::gemini::GeminiClient;
use proxyscope_core::insights::InsightRequester;
use proxyscope_core::session::{BatchState, Session};
use serde::Serialize;
use tracing::{info, warn};

use crate::commands::{self, AnalyzeArgs};
use crate::sprint;
use crate::terminal::{colors, format, print, spinner};

const SUMMARY_KEY_WIDTH: usize = 13;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    records: &'a [AddressRecord],
    stats: BatchStats,
    top_locations: Vec<LocationCount>,
    insights: &'a [Insight],
}

pub async fn analyze(args: AnalyzeArgs, cfg: &Config) -> anyhow::Result<()> {
    let input: String = read_input(&args)?;

    // 1. Instantiate Dependencies
    let classifier = BatchClassifier::new(commands::lookup_provider(cfg)?)
        .with_concurrency(cfg.concurrency)
        .with_progress(Arc::new(spinner::report_batch_progress));
    let requester: Option<InsightRequester> = if args.insights {
        insight_requester(cfg)
    } else {
        None
    };
    let mut session = Session::new(classifier, requester);

    // 2. Execute
    let start_time: Instant = Instant::now();
    let total: usize = tokenize(&input).len();
    if !args.json {
        spinner::start_batch_progress(total as u64);
    }
    let result = session.run_batch(&input).await.map(|records| records.len());
    spinner::finish();
    result?;

    if session.insights_enabled() && session.state().has_risky() {
        if !args.json {
            spinner::start_spinner("Generating security insights...");
        }
        let outcome = session.generate_insights().await;
        spinner::finish();
        if let InsightOutcome::Generated(insights) = outcome? {
            info!(count = insights.len(), "security insights ready");
        }
    }

    if let Some(dir) = &args.export {
        let date = chrono::Local::now().date_naive();
        match session
            .export_csv(dir, date)
            .with_context(|| format!("writing export to {}", dir.display()))?
        {
            Some(path) => info!("exported results to {}", path.display()),
            None => warn!("no results to export"),
        }
    }

    // 3. Present Results
    if args.json {
        return print_json(session.state());
    }
    batch_ends(session.state(), start_time.elapsed(), cfg);
    Ok(())
}

fn read_input(args: &AnalyzeArgs) -> anyhow::Result<String> {
    if !args.addresses.is_empty() {
        return Ok(args.addresses.join(" "));
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading addresses from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        info!("reading addresses from stdin, finish with Ctrl-D");
    }
    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("reading addresses from stdin")?;
    Ok(input)
}

fn insight_requester(cfg: &Config) -> Option<InsightRequester> {
    match GeminiClient::new(&cfg.insights) {
        Ok(client) => Some(InsightRequester::new(Arc::new(client))),
        Err(e) => {
            warn!("security insights disabled: {e} (set GEMINI_API_KEY or --gemini-key)");
            None
        }
    }
}

fn print_json(state: &BatchState) -> anyhow::Result<()> {
    let report = JsonReport {
        records: state.records(),
        stats: state.stats(),
        top_locations: state.top_locations(),
        insights: state.insights(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn batch_ends(state: &BatchState, total_time: Duration, cfg: &Config) {
    let records: &[AddressRecord] = state.records();
    if records.is_empty() {
        no_addresses(cfg);
        return;
    }

    if cfg.quiet > 0 {
        sprint!();
    }

    print::header("analysis results", cfg.quiet);
    print_records(records, cfg);

    print::header("summary", cfg.quiet);
    print_stats(&state.stats());

    print::header("top locations", cfg.quiet);
    print_locations(&state.top_locations());

    if !state.insights().is_empty() {
        print::header("security insights", cfg.quiet);
        print_insights(state.insights());
    }

    print_footer(records.len(), total_time, cfg);
}

fn no_addresses(cfg: &Config) {
    print::header("zero addresses provided", cfg.quiet);
    print::no_results();
    print::end_of_program();
}

fn print_records(records: &[AddressRecord], cfg: &Config) {
    for (idx, record) in records.iter().enumerate() {
        match cfg.quiet {
            0 => {
                print::tree_head(idx, &format::address_to_colored(record));
                print::as_tree_one_level(format::record_to_details(record));
                if idx + 1 != records.len() {
                    sprint!();
                }
            }
            1 => print::print_status(format::record_to_line(record)),
            _ => {}
        }
    }
}

fn print_stats(stats: &BatchStats) {
    let risky: ColoredString = if stats.risky > 0 {
        stats.risky.to_string().red().bold()
    } else {
        stats.risky.to_string().green()
    };

    print::aligned_line("Total Scanned", stats.total.to_string(), SUMMARY_KEY_WIDTH);
    print::aligned_line("Risky IPs", risky, SUMMARY_KEY_WIDTH);
    print::aligned_line("Clean IPs", stats.clean.to_string(), SUMMARY_KEY_WIDTH);
    print::aligned_line("Proxies", stats.proxies.to_string(), SUMMARY_KEY_WIDTH);
    print::aligned_line("VPN/DCH", stats.vpn_datacenter.to_string(), SUMMARY_KEY_WIDTH);
    print::aligned_line(
        "Risk Rate",
        format!("{}%", stats.risk_percentage_label()),
        SUMMARY_KEY_WIDTH,
    );
}

fn print_locations(locations: &[LocationCount]) {
    let max: usize = locations.iter().map(|l| l.count).max().unwrap_or(0);
    for location in locations {
        print::chart_bar(&location.country_short, location.count, max);
    }
}

fn print_insights(insights: &[Insight]) {
    for (idx, insight) in insights.iter().enumerate() {
        print::tree_head(idx, &insight.address.as_str().color(colors::PRIMARY));
        print::as_tree_one_level(format::insight_to_details(insight));
        if idx + 1 != insights.len() {
            sprint!();
        }
    }
}

fn print_footer(total: usize, total_time: Duration, cfg: &Config) {
    let addresses: ColoredString = format!("{total} addresses").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Analysis Complete: {addresses} classified in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::end_of_program();
        }
        _ => info!("{}", output),
    }
}
