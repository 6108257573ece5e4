use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn active() -> MutexGuard<'static, Option<ProgressBar>> {
    ACTIVE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

fn activate(pb: ProgressBar) {
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Some(previous) = active().replace(pb) {
        previous.finish_and_clear();
    }
}

/// Progress bar for a batch of `total` lookups.
pub fn start_batch_progress(total: u64) {
    let pb = ProgressBar::new(total);
    pb.set_style(style("{spinner:.blue} {msg} {bar:24.green/bright_black} {pos}/{len}"));
    pb.set_message("Resolving addresses...");
    activate(pb);
}

/// Indeterminate spinner for a single long-running call.
pub fn start_spinner(msg: &str) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style("{spinner:.blue} {msg}"));
    pb.set_message(msg.to_string());
    activate(pb);
}

pub fn report_batch_progress(done: usize, total: usize) {
    if let Some(pb) = active().as_ref() {
        pb.set_position(done as u64);
        pb.set_message(format!(
            "Resolved {} of {} addresses...",
            done.to_string().green().bold(),
            total
        ));
    }
}

pub fn finish() {
    if let Some(pb) = active().take() {
        pb.finish_and_clear();
    }
}

/// Routes log output above the active progress bar, or straight to stdout.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end_matches('\n');
        match active().as_ref() {
            Some(pb) if !pb.is_hidden() => pb.println(msg),
            _ => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{msg}")?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
