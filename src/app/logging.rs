//! Progress logging.

use std::time::Instant;

use log::info;

/// Logs how many domains are done and the current scan rate.
pub fn log_progress(start_time: Instant, completed: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!("Scanned {completed}/{total} domains in {elapsed_secs:.2} seconds (~{rate:.2} domains/sec)");
}
