use anyhow::Context;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::System;

use crate::Summary;

const BYTES_TO_KB: u64 = 1024;

#[derive(Default, Serialize, Clone, Debug)]
pub struct TimingMetrics {
    pub generation_duration: Option<Duration>,
    pub total_duration: Option<Duration>,
}

#[derive(Default, Serialize, Clone, Debug)]
pub struct TelemetryData {
    pub timestamp: String,
    pub bound: i64,
    pub terms_emitted: usize,
    pub last_term: Option<i64>,
    pub timing: TimingMetrics,
    pub used_memory_kb: Option<u64>,
}

pub struct TelemetryCollector {
    start_time: Instant,
    system: System,
    metrics: TelemetryData,
    enabled: bool,
}

impl TelemetryCollector {
    pub fn new(bound: i64, enabled: bool) -> Self {
        let metrics = TelemetryData {
            timestamp: chrono::Local::now().to_rfc3339(),
            bound,
            ..Default::default()
        };

        Self {
            start_time: Instant::now(),
            system: System::new(),
            metrics,
            enabled,
        }
    }

    pub fn record_generation(&mut self, duration: Duration, summary: &Summary) {
        if !self.enabled {
            return;
        }
        self.metrics.timing.generation_duration = Some(duration);
        self.metrics.terms_emitted = summary.terms;
        self.metrics.last_term = summary.last;
    }

    pub fn sample_memory(&mut self) {
        if !self.enabled {
            return;
        }
        self.system.refresh_memory();
        self.metrics.used_memory_kb = Some(self.system.used_memory() / BYTES_TO_KB);
    }

    pub fn finalize(self) -> Option<TelemetryData> {
        if !self.enabled {
            return None;
        }

        let mut final_metrics = self.metrics;
        let total = self.start_time.elapsed();
        final_metrics.timing.total_duration = Some(total);

        info!("Telemetry Summary:");
        info!("Total Duration: {:?}", total);
        if let Some(d) = final_metrics.timing.generation_duration {
            info!("Generation: {:?}", d);
        }
        info!(
            "Terms emitted: {}, last term: {:?}",
            final_metrics.terms_emitted, final_metrics.last_term
        );
        if let Some(kb) = final_metrics.used_memory_kb {
            info!("Used Memory: {} KB", kb);
        }

        Some(final_metrics)
    }
}

/// Writes `data` as pretty JSON into `dir`, creating it if needed.
pub fn write_report(data: &TelemetryData, dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create telemetry directory {}", dir.display()))?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%6f");
    let report_path = dir.join(format!("fibo_telemetry_{}_{}.json", data.bound, timestamp));
    fs::write(&report_path, serde_json::to_string_pretty(data)?)
        .with_context(|| format!("Failed to write {}", report_path.display()))?;
    Ok(report_path)
}
