//! Preload progress reporting with ETA estimation

use std::time::Instant;

/// Counts loaded and failed frames and periodically logs progress
pub struct ProgressTracker {
    total: u64,
    processed: u64,
    failed: u64,
    report_interval: u64,
    start_time: Instant,
    label: String,
}

impl ProgressTracker {
    /// Creates a new progress tracker reporting every `report_interval` items
    pub fn new(total: u64, report_interval: u64, label: &str) -> Self {
        Self {
            total,
            processed: 0,
            failed: 0,
            report_interval: report_interval.max(1),
            start_time: Instant::now(),
            label: label.to_string(),
        }
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn failed(&self) -> u64 {
        self.failed
    }

    /// Records one finished item and logs progress on interval boundaries
    pub fn record(&mut self, ok: bool) {
        self.processed += 1;
        if !ok {
            self.failed += 1;
        }
        if self.processed % self.report_interval == 0 || self.processed == self.total {
            self.report();
        }
    }

    fn report(&self) {
        let elapsed_secs = self.start_time.elapsed().as_secs_f64();
        let percent = if self.total > 0 {
            (self.processed as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        if self.processed < self.total {
            let rate = self.processed as f64 / elapsed_secs.max(f64::EPSILON);
            let remaining = (self.total - self.processed) as f64 / rate;
            tracing::info!(
                "{} {}/{} ({:.1}%) - elapsed: {} - ETA: {}",
                self.label,
                self.processed,
                self.total,
                percent,
                format_duration(elapsed_secs),
                format_duration(remaining),
            );
        } else {
            tracing::info!(
                "{} {}/{} ({} failed) - completed in {}",
                self.label,
                self.processed,
                self.total,
                self.failed,
                format_duration(elapsed_secs),
            );
        }
    }
}

/// Formats seconds as `4.3s`, `2m 5s` or `1h 2m 3s`
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    let whole = secs.round() as u64;
    let (hours, mins, secs) = (whole / 3600, whole / 60 % 60, whole % 60);
    if hours == 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{hours}h {mins}m {secs}s")
    }
}
