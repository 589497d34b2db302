use dioxus::logger::tracing::info;

use crate::cache::now_ms;

/// Wall-clock perf probe. Millisecond epoch stamps rather than `Instant`
/// because `Instant::now` is unavailable on wasm32-unknown-unknown.
#[inline]
pub fn perf_start() -> u64 {
    now_ms()
}

#[inline]
pub fn log_perf(scope: &str, started_at_ms: u64, details: &str) {
    let elapsed_ms = now_ms().saturating_sub(started_at_ms);
    if details.trim().is_empty() {
        info!("[perf] {scope} took {elapsed_ms}ms");
    } else {
        info!("[perf] {scope} took {elapsed_ms}ms | {details}");
    }
}
