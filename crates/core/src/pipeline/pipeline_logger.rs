use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for per-frame cleaning events.
///
/// Use cases report stage timings and mask statistics through this trait
/// instead of talking to `log` directly, so tests can swap in a silent logger.
pub trait PipelineLogger: Send {
    /// Report frame-level progress. `total` is the container estimate and
    /// may be 0 when unknown.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage (`mask`, `inpaint`, `blend`, `write`)
    /// took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-frame measurement such as the masked pixel ratio.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: forwards progress to `log::info!` every `throttle_frames`
/// frames and accumulates timings and metrics for a closing summary.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: BTreeMap<String, Vec<f64>>,
    metrics: BTreeMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: BTreeMap::new(),
            metrics: BTreeMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Cleaning summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        for (stage, durations) in &self.timings {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        for (name, values) in &self.metrics {
            lines.push(format!("  {name}: avg {:.3}", mean(values)));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(crate::shared::constants::PROGRESS_THROTTLE_FRAMES)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen += 1;
        if current % self.throttle_frames != 0 && current != total {
            return;
        }
        if total > 0 {
            let pct = (current as f64 / total as f64 * 100.0).min(100.0);
            log::info!("Processing: {current}/{total} frames ({pct:.1}%)");
        } else {
            log::info!("Processing: {current} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("mask", 5.0);
        logger.metric("masked_ratio", 0.2);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values_per_stage() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("inpaint", 20.0);
        logger.timing("inpaint", 30.0);
        logger.timing("blend", 5.0);

        let inpaint = logger.timings_for("inpaint").unwrap();
        assert_eq!(inpaint, &[20.0, 30.0]);
        assert_eq!(logger.timings_for("blend").unwrap(), &[5.0]);
        assert!(logger.timings_for("write").is_none());
    }

    #[test]
    fn test_metric_average_in_summary() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.metric("masked_ratio", 0.25);
        logger.metric("masked_ratio", 0.5);

        let values = logger.metrics_for("masked_ratio").unwrap();
        assert_relative_eq!(mean(values), 0.375);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("masked_ratio: avg 0.375"));
    }

    #[test]
    fn test_summary_lists_stages_in_name_order() {
        let mut logger = StdoutPipelineLogger::new(10);
        logger.timing("write", 1.0);
        logger.timing("blend", 1.0);
        logger.timing("mask", 1.0);

        let summary = logger.summary_string().unwrap();
        let blend = summary.find("blend").unwrap();
        let mask = summary.find("mask").unwrap();
        let write = summary.find("write").unwrap();
        assert!(blend < mask && mask < write);
        assert!(summary.starts_with("Cleaning summary"));
    }

    #[test]
    fn test_summary_reports_throughput_after_progress() {
        let mut logger = StdoutPipelineLogger::new(10);
        for i in 1..=4 {
            logger.progress(i, 4);
        }
        logger.timing("mask", 10.0);
        std::thread::sleep(std::time::Duration::from_millis(2));

        assert_eq!(logger.frames_seen(), 4);
        assert!(logger.summary_string().unwrap().contains("fps"));
    }

    #[test]
    fn test_progress_with_unknown_total_counts_frames() {
        let mut logger = StdoutPipelineLogger::new(2);
        for i in 1..=5 {
            logger.progress(i, 0);
        }
        assert_eq!(logger.frames_seen(), 5);
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_default_throttle_and_zero_clamp() {
        assert_eq!(StdoutPipelineLogger::default().throttle_frames, 30);
        assert_eq!(StdoutPipelineLogger::new(0).throttle_frames, 1);
    }
}
